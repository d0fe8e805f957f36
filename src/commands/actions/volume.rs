//! Volume command handler.
//!
//! Changes the playback volume, expressed in percent. The level is kept by the
//! [`VolumeControl`] owned by the command, where the playback command reads it.
//!
//! # Validation
//!
//! - **Volume**: Must be a number above 0 and at most the configured maximum

use std::sync::atomic::{AtomicU32, Ordering};

use log::{debug, info};

use crate::{
    commands::{
        CommandResult, InvocationContext,
        markdown_response::{
            format_volume_not_a_number, format_volume_set, format_volume_too_high,
            format_volume_too_low,
        },
    },
    utils::is_number,
};

/// Volume level when the bot starts, in percent.
pub const DEFAULT_VOLUME: u32 = 100;

/// Playback volume shared between concurrent invocations.
#[derive(Debug)]
pub struct VolumeControl {
    level: AtomicU32,
    maximum: u32,
}

impl VolumeControl {
    /// Creates a control at [`DEFAULT_VOLUME`], capped by the maximum if lower.
    pub fn new(maximum: u32) -> Self {
        VolumeControl {
            level: AtomicU32::new(DEFAULT_VOLUME.min(maximum)),
            maximum,
        }
    }

    /// Current level, in percent.
    pub fn level(&self) -> u32 {
        self.level.load(Ordering::Relaxed)
    }

    fn set_level(&self, level: u32) {
        self.level.store(level, Ordering::Relaxed);
    }
}

/// Sets the volume to the value of the `volume` argument.
pub fn handle_volume(context: &InvocationContext, control: &VolumeControl) -> CommandResult {
    debug!("handling volume command {:?}", context.parameters);

    let value = context
        .parameters
        .get("volume")
        .map(|volume| volume.trim_end_matches('%'))
        .unwrap_or_default();

    if !is_number(value) {
        return CommandResult::warning(format_volume_not_a_number());
    }

    let volume: f64 = value.parse().unwrap_or_default();

    if volume <= 0.0 {
        return CommandResult::warning(format_volume_too_low());
    }
    if volume > f64::from(control.maximum) {
        return CommandResult::warning(format_volume_too_high(control.maximum));
    }

    // At least 1% so that a positive request never mutes the playback
    let level = (volume.round() as u32).max(1);
    control.set_level(level);

    info!("{} set the volume to {}%", context.message.author.id, level);

    CommandResult::info(format_volume_set(level))
}
