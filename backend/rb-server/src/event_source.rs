//! Bridges robot change notifications onto the streaming hubs.

use crate::HubSet;

use rb_core::{MapRenderer, Robot, RobotEvent};
use rb_stream::{ShutdownCoordinator, ShutdownGuard};

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

/// Subscribe to the robot's notifications and forward them until shutdown.
///
/// The subscription is taken before the task is spawned so no notification
/// raised after this call returns is missed.
pub fn spawn(
    robot: Arc<dyn Robot>,
    renderer: Arc<dyn MapRenderer>,
    hubs: HubSet,
    shutdown: &ShutdownCoordinator,
) -> JoinHandle<()> {
    let events = robot.subscribe_events();
    let guard = shutdown.subscribe_guard();

    tokio::spawn(run(robot, renderer, hubs, events, guard))
}

pub async fn run(
    robot: Arc<dyn Robot>,
    renderer: Arc<dyn MapRenderer>,
    hubs: HubSet,
    mut events: broadcast::Receiver<RobotEvent>,
    mut guard: ShutdownGuard,
) {
    info!("Event source started");

    loop {
        tokio::select! {
            _ = guard.wait() => {
                info!("Event source stopping: shutdown");
                break;
            }
            received = events.recv() => match received {
                Ok(event) => dispatch(robot.as_ref(), renderer.as_ref(), &hubs, event),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Event source lagged, skipped {skipped} robot notification(s)");
                }
                Err(RecvError::Closed) => {
                    info!("Event source stopping: robot notifications closed");
                    break;
                }
            },
        }
    }
}

/// Publish the latest snapshot for one notification.
pub fn dispatch(robot: &dyn Robot, renderer: &dyn MapRenderer, hubs: &HubSet, event: RobotEvent) {
    let state = robot.state();

    let (hub, payload) = match event {
        RobotEvent::StateUpdated => (&hubs.state, state.to_json()),
        RobotEvent::StateAttributesUpdated => (&hubs.attributes, state.attributes_json()),
        RobotEvent::MapUpdated => {
            hubs.map_image.trigger(|| renderer.render(&state.map));
            (&hubs.map, state.map_json())
        }
    };

    match payload {
        Ok(json) => {
            let delivered = hub.publish(event.as_str(), json);
            debug!("{event} delivered to {delivered} subscriber(s)");
        }
        Err(e) => warn!("Dropping {event}: {e}"),
    }
}
