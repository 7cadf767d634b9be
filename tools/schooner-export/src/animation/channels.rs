//! Channel probing and keyframe records

use std::io::{self, Write};

use schooner_common::{BinaryWriter, MovementFlags, BONE_CURVE_COMPONENTS};

use crate::config::{ChannelOptions, ScaleMode};
use crate::error::ValidationError;
use crate::scene::{Action, Curve};

/// Location curve data path (x, y, z)
pub const LOCATION_PATH: &str = "location";
/// Quaternion rotation curve data path (w, x, y, z)
pub const ROTATION_PATH: &str = "rotation_quaternion";
/// Scale curve data path (x, y, z; uniform scale uses x only)
pub const SCALE_PATH: &str = "scale";

/// Scale curves of an action
#[derive(Debug, Clone, Copy)]
pub enum ScaleCurves<'a> {
    Uniform(&'a Curve),
    Axis([&'a Curve; 3]),
}

impl<'a> ScaleCurves<'a> {
    pub fn curves(&self) -> &[&'a Curve] {
        match self {
            Self::Uniform(curve) => std::slice::from_ref(curve),
            Self::Axis(curves) => curves,
        }
    }
}

/// Movement channels found in an action.
///
/// A channel is only present when every one of its component curves exists
/// and has keyframes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelSet<'a> {
    pub location: Option<[&'a Curve; 3]>,
    pub rotation: Option<[&'a Curve; 4]>,
    pub scale: Option<ScaleCurves<'a>>,
}

impl<'a> ChannelSet<'a> {
    /// Look up the channels requested by `options` in `action`.
    ///
    /// Axis scale falls back to uniform scale when any axis curve is missing.
    pub fn probe(action: &'a Action, options: &ChannelOptions) -> Self {
        let location = if options.location {
            probe_channel::<3>(action, LOCATION_PATH)
        } else {
            None
        };
        let rotation = if options.rotation {
            probe_channel::<4>(action, ROTATION_PATH)
        } else {
            None
        };

        let uniform =
            || probe_channel::<1>(action, SCALE_PATH).map(|[curve]| ScaleCurves::Uniform(curve));
        let scale = match options.scale {
            ScaleMode::None => None,
            ScaleMode::Uniform => uniform(),
            ScaleMode::Axis => probe_channel::<3>(action, SCALE_PATH)
                .map(ScaleCurves::Axis)
                .or_else(|| {
                    tracing::debug!(
                        "{}: axis scale unavailable, trying uniform scale",
                        action.name
                    );
                    uniform()
                }),
        };

        Self {
            location,
            rotation,
            scale,
        }
    }

    pub fn flags(&self) -> MovementFlags {
        MovementFlags {
            location: self.location.is_some(),
            rotation: self.rotation.is_some(),
            uniform_scale: matches!(self.scale, Some(ScaleCurves::Uniform(_))),
            axis_scale: matches!(self.scale, Some(ScaleCurves::Axis(_))),
        }
    }

    /// Component curves of each enabled channel, in write order
    pub fn channels(&self) -> impl Iterator<Item = &[&'a Curve]> + '_ {
        let location = self.location.as_ref().map(|c| c.as_slice());
        let rotation = self.rotation.as_ref().map(|c| c.as_slice());
        let scale = self.scale.as_ref().map(ScaleCurves::curves);
        [location, rotation, scale].into_iter().flatten()
    }

    /// Every enabled component curve, in write order
    pub fn curves(&self) -> impl Iterator<Item = &'a Curve> + '_ {
        self.channels().flat_map(|curves| curves.iter().copied())
    }

    /// Earliest first-keyframe time over the enabled channels
    pub fn start_time(&self) -> Option<f32> {
        earliest(self.curves())
    }

    /// Each channel shares one keyframe count, so its component curves must
    /// all have as many keyframes as the first one
    pub fn check_parallel(&self) -> Result<(), ValidationError> {
        for curves in self.channels() {
            let expected = curves.first().map_or(0, |c| c.keyframes.len());
            if let Some(uneven) = curves.iter().find(|c| c.keyframes.len() != expected) {
                return Err(ValidationError::UnevenChannel {
                    data_path: uneven.data_path.clone(),
                    array_index: uneven.array_index,
                    expected,
                    found: uneven.keyframes.len(),
                });
            }
        }
        Ok(())
    }

    /// Write one keyframe count per channel, then the records of each of its
    /// component curves
    pub fn write<W: Write>(&self, w: &mut BinaryWriter<W>, origin: f32) -> io::Result<()> {
        for curves in self.channels() {
            let count = curves.first().map_or(0, |c| c.keyframes.len());
            // Keyframe counts are checked against MAX_KEYFRAMES before encoding
            w.write_u8(count as u8)?;
            for curve in curves {
                write_records(w, curve, origin)?;
            }
        }
        Ok(())
    }
}

/// Find all `N` components of a channel, or none of them
fn probe_channel<'a, const N: usize>(
    action: &'a Action,
    data_path: &str,
) -> Option<[&'a Curve; N]> {
    let mut found = Vec::with_capacity(N);
    for index in 0..N {
        match action.find_curve(data_path, index as u32) {
            Some(curve) if !curve.keyframes.is_empty() => found.push(curve),
            _ => {
                tracing::debug!(
                    "{}: no keyframes for {}[{}], channel disabled",
                    action.name,
                    data_path,
                    index
                );
                return None;
            }
        }
    }
    found.try_into().ok()
}

/// Quaternion curves of one bone in an armature action
#[derive(Debug, Clone, Copy, Default)]
pub struct BoneCurves<'a> {
    /// w, x, y, z
    pub components: [Option<&'a Curve>; BONE_CURVE_COMPONENTS],
}

impl<'a> BoneCurves<'a> {
    /// Pick the rotation curves from the action group named after `bone`.
    ///
    /// Groups with fewer than four channels are ignored.
    pub fn resolve(action: &'a Action, bone: &str) -> Self {
        let group: Vec<&Curve> = action.group_channels(bone).collect();
        if group.len() < BONE_CURVE_COMPONENTS {
            return Self::default();
        }

        let mut components = [None; BONE_CURVE_COMPONENTS];
        for (index, slot) in components.iter_mut().enumerate() {
            *slot = group
                .iter()
                .find(|c| c.data_path.contains(ROTATION_PATH) && c.array_index == index as u32)
                .copied();
        }
        Self { components }
    }

    pub fn curves(&self) -> impl Iterator<Item = &'a Curve> + '_ {
        self.components.iter().flatten().copied()
    }

    pub fn write<W: Write>(&self, w: &mut BinaryWriter<W>, origin: f32) -> io::Result<()> {
        for curve in self.components {
            write_curve(w, curve, origin)?;
        }
        Ok(())
    }
}

/// Earliest first-keyframe time of a set of curves
fn earliest<'a>(curves: impl Iterator<Item = &'a Curve>) -> Option<f32> {
    curves.filter_map(Curve::start_time).reduce(f32::min)
}

/// Write a keyframe count followed by the keyframe records of a curve.
///
/// A missing curve writes a zero count.
pub fn write_curve<W: Write>(
    w: &mut BinaryWriter<W>,
    curve: Option<&Curve>,
    origin: f32,
) -> io::Result<()> {
    let Some(curve) = curve else {
        return w.write_u8(0);
    };

    // Keyframe counts are checked against MAX_KEYFRAMES before encoding
    w.write_u8(curve.keyframes.len() as u8)?;
    write_records(w, curve, origin)
}

/// Write the keyframe records of a curve, without a count.
///
/// Each record is the left handle (skipped on the first keyframe), the point,
/// then the right handle (skipped on the last keyframe), all as time/value
/// pairs shifted by `origin`.
pub fn write_records<W: Write>(
    w: &mut BinaryWriter<W>,
    curve: &Curve,
    origin: f32,
) -> io::Result<()> {
    let last = curve.keyframes.len().saturating_sub(1);
    for (index, key) in curve.keyframes.iter().enumerate() {
        if index > 0 {
            write_pair(w, key.handle_left, origin)?;
        }
        write_pair(w, key.co, origin)?;
        if index < last {
            write_pair(w, key.handle_right, origin)?;
        }
    }
    Ok(())
}

fn write_pair<W: Write>(
    w: &mut BinaryWriter<W>,
    [time, value]: [f32; 2],
    origin: f32,
) -> io::Result<()> {
    w.write_f32(time - origin)?;
    w.write_f32(value)
}
