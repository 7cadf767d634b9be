//! Animation encoder (actions -> movement and bone curve blocks)
//!
//! An action is encoded as a name, a movement flag byte and the enabled
//! channels' keyframe curves. Armature actions append four quaternion curves
//! per exported bone. All keyframe times are shifted by the earliest first
//! keyframe of the enabled movement channels.

mod channels;
mod discovery;
mod naming;


use std::io::{self, Write};

use schooner_common::{BinaryWriter, MovementFlags, MAX_KEYFRAMES};

use crate::config::ChannelOptions;
use crate::error::ValidationError;
use crate::scene::{Action, Bone, Curve};

// Re-export public API
pub use channels::{
    write_curve, write_records, BoneCurves, ChannelSet, ScaleCurves, LOCATION_PATH,
    ROTATION_PATH, SCALE_PATH,
};
pub use discovery::{actions_of_armature, actions_of_object};
pub use naming::{base_name, ActionNamer};

/// One encoded action, ready to be written
#[derive(Debug, Clone)]
pub struct ActionBlock<'a> {
    /// Record name (suffix of the action name)
    pub name: String,
    pub channels: ChannelSet<'a>,
    /// One entry per exported bone (armature actions only)
    pub bone_curves: Vec<BoneCurves<'a>>,
    /// Time subtracted from every keyframe
    pub origin: f32,
}

impl<'a> ActionBlock<'a> {
    /// Block for an object-level action (.sch3Dmovements)
    pub fn movement(
        action: &'a Action,
        name: String,
        options: &ChannelOptions,
    ) -> Result<Self, ValidationError> {
        let channels = ChannelSet::probe(action, options);
        check_keyframes(channels.curves())?;
        channels.check_parallel()?;

        Ok(Self {
            name,
            origin: channels.start_time().unwrap_or(0.0),
            channels,
            bone_curves: Vec::new(),
        })
    }

    /// Block for an armature action, with quaternion curves for each of
    /// `bones`.
    ///
    /// Bone curves are shifted by the movement channels' origin; an action
    /// without movement channels keeps its bone times as they are.
    pub fn armature(
        action: &'a Action,
        name: String,
        options: &ChannelOptions,
        bones: &[&Bone],
    ) -> Result<Self, ValidationError> {
        let channels = ChannelSet::probe(action, options);
        let bone_curves: Vec<BoneCurves<'a>> = bones
            .iter()
            .map(|bone| BoneCurves::resolve(action, &bone.name))
            .collect();

        check_keyframes(channels.curves())?;
        channels.check_parallel()?;
        check_keyframes(bone_curves.iter().flat_map(|b| b.curves()))?;

        Ok(Self {
            name,
            origin: channels.start_time().unwrap_or(0.0),
            channels,
            bone_curves,
        })
    }

    pub fn flags(&self) -> MovementFlags {
        self.channels.flags()
    }

    /// Write the name, flag byte and curves of this action.
    ///
    /// An action without movement channels writes a zero flag byte and no
    /// movement curves; bone curves follow either way.
    pub fn write<W: Write>(&self, w: &mut BinaryWriter<W>) -> io::Result<()> {
        w.write_str(&self.name)?;

        let flags = self.flags();
        w.write_flags(&flags.bits(), 1)?;
        if !flags.is_empty() {
            self.channels.write(w, self.origin)?;
        }

        for bone in &self.bone_curves {
            bone.write(w, self.origin)?;
        }
        Ok(())
    }
}

fn check_keyframes<'c>(curves: impl Iterator<Item = &'c Curve>) -> Result<(), ValidationError> {
    for curve in curves {
        if curve.keyframes.len() > MAX_KEYFRAMES {
            return Err(ValidationError::TooManyKeyframes {
                data_path: curve.data_path.clone(),
                array_index: curve.array_index,
                count: curve.keyframes.len(),
                max: MAX_KEYFRAMES,
            });
        }
    }
    Ok(())
}
