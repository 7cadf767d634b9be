//! Schooner 3D file assemblers
//!
//! Re-exports the wire vocabulary from schooner-common and lays out the three
//! file kinds on top of a [`BinaryWriter`].

pub use schooner_common::formats::*;
pub use schooner_common::BinaryWriter;

use std::io::{self, Write};

use crate::animation::ActionBlock;
use crate::mesh::MeshExport;
use crate::skeleton::Skeleton;

/// Write a complete .sch3Dmesh file
///
/// Counts are assumed to fit their u16 fields; mesh processing rejects
/// anything larger.
pub fn write_mesh<W: Write>(w: &mut BinaryWriter<W>, mesh: &MeshExport) -> io::Result<()> {
    let geometry = mesh.geometry();

    w.write_i32(FORMAT_VERSION)?;
    w.write_flags(&mesh.flags().bits(), 1)?;
    w.write_u16(geometry.face_count() as u16)?;
    w.write_u16(geometry.vertex_count() as u16)?;
    w.write_all_u16(&geometry.indices)?;
    w.write_all_f32(&geometry.positions)?;

    if let Some(texture) = mesh.texture() {
        w.write_u16(texture.sharp_vertices.len() as u16)?;
        w.write_all_u16(&texture.sharp_vertices)?;
        w.write_all_f32(&texture.uvs)?;
    }

    if let Some(skin) = mesh.skin() {
        for influences in &skin.weights {
            w.write_u8(influences.len() as u8)?;
            for influence in influences {
                w.write_u8(influence.bone)?;
                w.write_f32(influence.weight)?;
            }
        }
    }

    Ok(())
}

/// Write a complete .sch3Darmature file
pub fn write_armature<W: Write>(
    w: &mut BinaryWriter<W>,
    skeleton: &Skeleton<'_>,
    actions: &[ActionBlock<'_>],
) -> io::Result<()> {
    w.write_i32(FORMAT_VERSION)?;
    w.write_u8(skeleton.count_byte())?;

    for (bone, &parent) in skeleton.bones.iter().zip(&skeleton.parents) {
        w.write_all_f32(&bone.head)?;
        w.write_u8(parent)?;
    }

    for action in actions {
        action.write(w)?;
    }

    Ok(())
}

/// Write a complete .sch3Dmovements file
pub fn write_movements<W: Write>(
    w: &mut BinaryWriter<W>,
    actions: &[ActionBlock<'_>],
) -> io::Result<()> {
    w.write_i32(FORMAT_VERSION)?;
    for action in actions {
        action.write(w)?;
    }
    Ok(())
}
