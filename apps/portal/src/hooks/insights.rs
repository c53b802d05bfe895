use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

const INSIGHTS_DELAY_MS: u32 = 1_500;

/// Flips to `true` once the dashboard insight cards may render; until then
/// the view shows skeletons.
pub fn use_insights_ready() -> Signal<bool> {
    let mut ready = use_signal(|| false);

    use_future(move || async move {
        TimeoutFuture::new(INSIGHTS_DELAY_MS).await;
        ready.set(true);
    });

    ready
}
