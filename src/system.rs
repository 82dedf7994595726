// File: ./src/system.rs
use crate::model::CalendarEvent;
use crate::notifications::{Notification, NotificationService};
use chrono::{Local, NaiveDateTime};
use tokio::sync::mpsc;
use tokio::time::{Duration, Instant, sleep_until};

#[derive(Debug, Clone)]
pub enum NotificationCommand {
    /// Replace the watched event list and reschedule reminders for it.
    Schedule(Vec<CalendarEvent>),
    Snooze(String, i64), // Notification id, minutes
    Dismiss(String),
}

fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Spawns the background reminder manager.
/// returns: Sender to push commands to it.
///
/// Delivered notifications are forwarded to `ui_sender` if one is given.
pub fn spawn_notification_actor(
    mut service: NotificationService,
    ui_sender: Option<mpsc::Sender<Notification>>,
) -> mpsc::Sender<NotificationCommand> {
    let (tx, mut rx) = mpsc::channel(10);

    tokio::spawn(async move {
        loop {
            let now = now_local();

            for notification in service.deliver_due(now) {
                log::info!("Reminder: {} - {}", notification.title, notification.message);
                if let Some(ui_tx) = &ui_sender {
                    let _ = ui_tx.send(notification).await;
                }
            }

            let command = if let Some(target) = service.next_due_time() {
                let millis = (target - now_local()).num_milliseconds();
                // Clamp so a slightly stale target does not produce a negative wait.
                let deadline = Instant::now() + Duration::from_millis(millis.max(0) as u64);

                tokio::select! {
                    _ = sleep_until(deadline) => None,
                    cmd = rx.recv() => match cmd {
                        Some(cmd) => Some(cmd),
                        None => break,
                    },
                }
            } else {
                // Nothing pending: just wait for commands.
                match rx.recv().await {
                    Some(cmd) => Some(cmd),
                    None => break,
                }
            };

            let Some(command) = command else {
                continue;
            };

            let now = now_local();
            match command {
                NotificationCommand::Schedule(events) => {
                    let mut total = 0;
                    for event in &events {
                        service.remove_for_event(&event.uid);
                        total += service.schedule_event_notifications(event, now);
                    }
                    log::debug!("Scheduled {} reminders for {} events", total, events.len());
                }
                NotificationCommand::Snooze(id, minutes) => {
                    if !service.snooze(&id, minutes, now) {
                        log::warn!("Cannot snooze unknown notification {}", id);
                    }
                }
                NotificationCommand::Dismiss(id) => {
                    service.dismiss(&id);
                }
            }
        }
        log::debug!("Notification actor stopped");
    });

    tx
}
