//! Central system ordering labels to make update sequence explicit.
//! Stages (high-level):
//! 0. Pointer collection (`PreUpdate`, after Bevy input)
//! 1. PrePhysics (`Update`): round transitions, sling, bird spawn; camera gestures run right after
//! 2. Rapier (handled by plugin in `PostUpdate`)
//! 3. PostPhysicsAdjust (`PostUpdate`, after rapier writeback): contacts, resting check, camera constraints
//! 4. Rendering (implicit)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PrePhysicsSet; // input & direct body edits before the physics step

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PostPhysicsAdjustSet; // reactions to the step's results
