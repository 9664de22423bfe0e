//! Test helpers.
//!
//! Bevy provides `World::run_system_once` (via the `RunSystemOnce` trait) for quickly
//! executing a system in tests without building a full schedule.
//!
//! Systems that use `Commands` enqueue structural changes; we call `world.flush()` after
//! running so queued commands are applied before assertions.

use std::time::Duration;

use bevy::ecs::message::Messages;
use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// Ensure the message buffer for `M` exists so readers/writers validate.
pub fn ensure_messages<M: Message>(world: &mut World) {
    if world.get_resource::<Messages<M>>().is_none() {
        world.init_resource::<Messages<M>>();
    }
}

/// Read every buffered `M` without consuming it for other readers.
pub fn collect_messages<M: Message + Clone>(world: &mut World) -> Vec<M> {
    ensure_messages::<M>(world);
    run_system_once(world, |mut reader: MessageReader<M>| {
        reader.read().cloned().collect::<Vec<M>>()
    })
}

/// Drop every buffered `M`.
pub fn clear_messages<M: Message>(world: &mut World) {
    ensure_messages::<M>(world);
    world.resource_mut::<Messages<M>>().clear();
}

/// Insert a virtual clock advanced by `secs`.
pub fn insert_time(world: &mut World, secs: f32) {
    let mut time = Time::<()>::default();
    time.advance_by(Duration::from_secs_f32(secs));
    world.insert_resource(time);
}

/// Advance the already-inserted virtual clock by `secs`.
pub fn advance_time(world: &mut World, secs: f32) {
    world
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(secs));
}
