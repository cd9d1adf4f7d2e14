/// Polled by long-running work to find out whether its result is still wanted.
pub trait CancelToken: Send + Sync {
    fn is_cancelled(&self) -> bool;
}

impl<F> CancelToken for F
where
    F: Fn() -> bool + Send + Sync,
{
    #[inline]
    fn is_cancelled(&self) -> bool {
        self()
    }
}
