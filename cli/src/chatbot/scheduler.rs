//! # Reply Scheduling
//!
//! File: cli/src/chatbot/scheduler.rs
//!
//! ## Overview
//!
//! The controller never sleeps. It hands each pending reply to a `Scheduler`,
//! and whoever owns the controller feeds due replies back into
//! `Controller::resolve`. Two implementations exist:
//!
//! - `VirtualScheduler`: a manual clock. Tests call `advance` and get the
//!   replies that came due, in expiry order.
//! - `TokioScheduler`: a background timer task that delivers due replies over
//!   an mpsc channel to the task that owns the controller. The timer task
//!   never touches the conversation log.
//!
//! Scheduled replies cannot be cancelled; every one of them is delivered.
//!
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

use super::message::TypingId;

/// A submission waiting for its delayed reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    /// Placeholder shown while the bot is "typing".
    pub typing: TypingId,
    /// The user's text, classified when the reply resolves.
    pub text: String,
}

/// Capability to run a reply after a delay.
pub trait Scheduler {
    fn schedule_after(&mut self, delay: Duration, reply: PendingReply);
}

#[derive(Debug)]
struct Scheduled {
    due: Duration,
    order: u64,
    reply: PendingReply,
}

/// Deterministic scheduler driven by an explicit virtual clock.
#[derive(Debug, Default)]
pub struct VirtualScheduler {
    now: Duration,
    next_order: u64,
    queue: Vec<Scheduled>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time, measured from construction.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Replies scheduled but not yet due.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Moves the clock forward and returns every reply due by the new time,
    /// earliest first. Replies due at the same instant keep scheduling order.
    pub fn advance(&mut self, by: Duration) -> Vec<PendingReply> {
        self.now += by;
        let now = self.now;
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.queue.drain(..).partition(|item| item.due <= now);
        self.queue = waiting;
        due.sort_by_key(|item| (item.due, item.order));
        due.into_iter().map(|item| item.reply).collect()
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule_after(&mut self, delay: Duration, reply: PendingReply) {
        let order = self.next_order;
        self.next_order += 1;
        self.queue.push(Scheduled {
            due: self.now + delay,
            order,
            reply,
        });
    }
}

/// Timer-backed scheduler for use inside a tokio runtime.
///
/// A single background task owns every pending timer, so replies come out in
/// expiry order and, for equal deadlines, in scheduling order.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    jobs: mpsc::UnboundedSender<Timer>,
}

impl TokioScheduler {
    /// Starts the timer task and returns the scheduler together with the
    /// receiver that yields due replies. Must be called within a runtime.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PendingReply>) {
        let (jobs, job_rx) = mpsc::unbounded_channel();
        let (due_tx, due_rx) = mpsc::unbounded_channel();
        tokio::spawn(run_timers(job_rx, due_tx));
        (Self { jobs }, due_rx)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_after(&mut self, delay: Duration, reply: PendingReply) {
        debug!(typing = ?reply.typing, ?delay, "scheduling reply");
        let timer = Timer {
            deadline: Instant::now() + delay,
            order: 0,
            reply,
        };
        if self.jobs.send(timer).is_err() {
            warn!("Timer task is gone; reply could not be scheduled.");
        }
    }
}

#[derive(Debug)]
struct Timer {
    deadline: Instant,
    order: u64,
    reply: PendingReply,
}

impl PartialEq for Timer {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Timer {}

impl PartialOrd for Timer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timer {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.deadline, self.order).cmp(&(other.deadline, other.order))
    }
}

/// Holds timers until they expire and forwards their replies. Keeps running
/// after the scheduler is dropped until every accepted timer has fired.
async fn run_timers(
    mut jobs: mpsc::UnboundedReceiver<Timer>,
    due: mpsc::UnboundedSender<PendingReply>,
) {
    let mut queue: BinaryHeap<Reverse<Timer>> = BinaryHeap::new();
    let mut next_order = 0u64;
    let mut accepting = true;

    loop {
        let next_deadline = queue.peek().map(|Reverse(timer)| timer.deadline);
        if !accepting && next_deadline.is_none() {
            break;
        }
        tokio::select! {
            job = jobs.recv(), if accepting => match job {
                Some(mut timer) => {
                    timer.order = next_order;
                    next_order += 1;
                    queue.push(Reverse(timer));
                }
                None => accepting = false,
            },
            _ = sleep_until(next_deadline.unwrap_or_else(Instant::now)), if next_deadline.is_some() => {
                let now = Instant::now();
                while queue.peek().is_some_and(|Reverse(timer)| timer.deadline <= now) {
                    let Some(Reverse(timer)) = queue.pop() else { break };
                    if due.send(timer.reply).is_err() {
                        warn!("Reply receiver dropped before a scheduled reply was delivered.");
                    }
                }
            }
        }
    }
    debug!("Timer task finished");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(id: u64, text: &str) -> PendingReply {
        PendingReply {
            typing: TypingId(id),
            text: text.to_string(),
        }
    }

    #[test]
    fn virtual_scheduler_releases_only_due_replies() {
        let mut scheduler = VirtualScheduler::new();
        scheduler.schedule_after(Duration::from_millis(500), reply(0, "first"));

        assert!(scheduler.advance(Duration::from_millis(499)).is_empty());
        assert_eq!(scheduler.pending(), 1);

        let due = scheduler.advance(Duration::from_millis(1));
        assert_eq!(due, vec![reply(0, "first")]);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.now(), Duration::from_millis(500));
    }

    #[test]
    fn virtual_scheduler_orders_by_expiry_then_schedule_order() {
        let mut scheduler = VirtualScheduler::new();
        scheduler.schedule_after(Duration::from_millis(300), reply(0, "late"));
        scheduler.schedule_after(Duration::from_millis(100), reply(1, "early"));
        scheduler.schedule_after(Duration::from_millis(100), reply(2, "early too"));

        let due = scheduler.advance(Duration::from_secs(1));
        let texts: Vec<_> = due.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["early", "early too", "late"]);
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_scheduler_delivers_in_schedule_order_after_delay() {
        let (mut scheduler, mut replies) = TokioScheduler::channel();
        let start = Instant::now();
        scheduler.schedule_after(Duration::from_millis(500), reply(0, "hi"));
        scheduler.schedule_after(Duration::from_millis(500), reply(1, "when"));

        let first = replies.recv().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(500));
        let second = replies.recv().await.unwrap();
        assert_eq!(first, reply(0, "hi"));
        assert_eq!(second, reply(1, "when"));
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_scheduler_orders_by_deadline() {
        let (mut scheduler, mut replies) = TokioScheduler::channel();
        scheduler.schedule_after(Duration::from_millis(300), reply(0, "slow"));
        scheduler.schedule_after(Duration::from_millis(100), reply(1, "fast"));

        assert_eq!(replies.recv().await.unwrap().text, "fast");
        assert_eq!(replies.recv().await.unwrap().text, "slow");
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_scheduler_fires_after_being_dropped() {
        let (mut scheduler, mut replies) = TokioScheduler::channel();
        scheduler.schedule_after(Duration::from_millis(50), reply(0, "still delivered"));
        drop(scheduler);

        assert_eq!(replies.recv().await.unwrap().text, "still delivered");
        // Timer task exits once nothing is left, closing the channel.
        assert!(replies.recv().await.is_none());
    }
}
