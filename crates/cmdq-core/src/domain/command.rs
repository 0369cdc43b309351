//! Command - ワーカーが実行する作業単位
//!
//! キューは Command の中身を一切見ません。`execute()` を 1 回呼ぶだけです。

/// Command はワーカースレッド上で実行される作業
///
/// # 使用例
/// ```ignore
/// struct PrintCommand {
///     msg: String,
/// }
///
/// impl Command for PrintCommand {
///     fn execute(&mut self) {
///         println!("{}", self.msg);
///     }
/// }
///
/// queue.enqueue(PrintCommand { msg: "Hello".into() });
/// queue.enqueue(|| println!("closures work too"));
/// ```
///
/// # Trait Bounds
/// - `Send`: producer スレッドから worker スレッドへ move するため
/// - `'static`: キューに格納されている間、借用を持たないため
pub trait Command: Send + 'static {
    /// Run the command to completion on the worker thread.
    fn execute(&mut self);

    /// Name used in log events.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<F> Command for F
where
    F: FnMut() + Send + 'static,
{
    fn execute(&mut self) {
        self()
    }

    fn name(&self) -> &str {
        "closure"
    }
}
