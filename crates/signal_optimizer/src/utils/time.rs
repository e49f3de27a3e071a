/// Runs `$block`, logs how long it took at debug level and evaluates to the
/// block's value.
#[macro_export]
macro_rules! timed {
    ($msg:expr, $block:expr) => {{
        let started_at = jiff::Timestamp::now();
        let result = $block;
        let elapsed = jiff::Timestamp::now().duration_since(started_at);

        tracing::debug!(elapsed = ?elapsed, "{}", $msg);

        result
    }};
}
