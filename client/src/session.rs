use tokio::sync::mpsc;
use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};
use tracing::{debug, error, warn};

use crate::client::{Client, RoleDriver};
use crate::connection::Connection;
use crate::phase::Countdown;
use crate::presenter::Presenter;

const TICK: Duration = Duration::from_secs(1);

/// Drive one client over one connection until the connection closes.
///
/// Frames, user actions and countdown ticks are handled one at a time on this
/// task, so no handler ever observes another one half-done. At most one
/// countdown exists: restarting it replaces the previous interval.
pub async fn run<C, D, P>(
    mut connection: C,
    mut client: Client<D, P>,
    mut actions: mpsc::UnboundedReceiver<D::Action>,
) -> Client<D, P>
where
    C: Connection,
    D: RoleDriver,
    P: Presenter,
{
    let mut countdown: Option<Interval> = None;
    let mut actions_open = true;

    loop {
        tokio::select! {
            frame = connection.recv_text() => match frame {
                Some(Ok(text)) => {
                    let next = client.handle_frame(&text);
                    update_countdown(&mut countdown, next);
                }
                Some(Err(e)) => {
                    error!("Connection error: {}", e);
                    break;
                }
                None => break,
            },
            action = actions.recv(), if actions_open => match action {
                Some(action) => {
                    if let Some(frame) = client.handle_action(action) {
                        debug!(frame = %frame, "Sending command");
                        if let Err(e) = connection.send_text(frame) {
                            warn!("Failed to queue command: {}", e);
                        }
                    }
                }
                None => {
                    debug!("Input closed; still listening to the server");
                    actions_open = false;
                }
            },
            _ = next_tick(&mut countdown) => {
                let next = client.tick();
                update_countdown(&mut countdown, next);
            }
        }
    }

    client.handle_close();
    client
}

fn update_countdown(countdown: &mut Option<Interval>, next: Countdown) {
    match next {
        Countdown::Restart => {
            // Assigning drops the previous interval, so its pending ticks never
            // fire and only one countdown is ever live.
            let mut interval = interval_at(Instant::now() + TICK, TICK);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            *countdown = Some(interval);
        }
        Countdown::Cancel => *countdown = None,
        Countdown::Keep => {}
    }
}

async fn next_tick(countdown: &mut Option<Interval>) {
    match countdown {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}
