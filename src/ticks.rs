use std::time::Duration;

use futures::channel::mpsc;

use crate::app::Message;

/// A repeating timer feeding the update loop. The interval is part of the
/// subscription identity, so changing it restarts the thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Ticker {
    /// Periodic inactivity check.
    Idle(u64),
    /// Slide animation frames; only subscribed while sliding.
    Slide(u64),
}

impl Ticker {
    fn interval(self) -> Duration {
        match self {
            Ticker::Idle(ms) | Ticker::Slide(ms) => Duration::from_millis(ms.max(1)),
        }
    }

    fn message(self) -> Message {
        match self {
            Ticker::Idle(_) => Message::IdleCheck,
            Ticker::Slide(_) => Message::SlideTick,
        }
    }
}

pub(crate) fn tick_stream(ticker: &Ticker) -> mpsc::UnboundedReceiver<Message> {
    let ticker = *ticker;
    let interval = ticker.interval();
    let (tx, rx) = mpsc::unbounded();
    std::thread::spawn(move || loop {
        std::thread::sleep(interval);
        if tx.unbounded_send(ticker.message()).is_err() {
            log::debug!("{ticker:?} stopped");
            break;
        }
    });
    rx
}
