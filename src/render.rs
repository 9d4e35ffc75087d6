//! Boundary between the playback core and the rendering collaborator.
//!
//! The core never touches a graphics API. For every slot whose frame
//! changed it packs per-instance transforms into [`SlotTransforms`] and
//! hands them to a [`TransformSink`]; uploading and drawing are the sink's
//! business.

use std::time::Duration;

use glam::{Mat4, Quat, Vec3};

use crate::{
    animation::{BondSegment, CurrentFrame},
    options::{ColorOptions, DisplayOptions},
    trajectory::Topology,
};

/// Per-instance data for one atom sphere or bond cylinder.
/// Must match the instance vertex layout of the mesh shader.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    /// Column-major model matrix.
    pub model: [[f32; 4]; 4],
    /// RGBA color.
    pub color: [f32; 4],
}

impl InstanceRaw {
    /// Instance from a model matrix and an RGB color (opaque).
    #[must_use]
    pub fn new(model: Mat4, rgb: [f32; 3]) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: [rgb[0], rgb[1], rgb[2], 1.0],
        }
    }

    /// Model matrix as a [`Mat4`].
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }
}

/// Model matrix placing a unit sphere at `center` with uniform `scale`.
#[must_use]
pub fn atom_transform(center: Vec3, scale: f32) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        Vec3::splat(scale),
        Quat::IDENTITY,
        center,
    )
}

/// Model matrix stretching a unit cylinder (radius 1, base at the origin,
/// running to `z = 1`) from `a` to `b` with the given radius.
///
/// Coincident endpoints produce a zero-length cylinder at `a`.
#[must_use]
pub fn bond_transform(a: Vec3, b: Vec3, radius: f32) -> Mat4 {
    let delta = b - a;
    let length = delta.length();
    let rotation = delta
        .try_normalize()
        .map_or(Quat::IDENTITY, |dir| Quat::from_rotation_arc(Vec3::Z, dir));
    Mat4::from_scale_rotation_translation(
        Vec3::new(radius, radius, length),
        rotation,
        a,
    )
}

/// Packed instances for one slot's current frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotTransforms {
    /// One instance per atom, in topology order.
    pub atoms: Vec<InstanceRaw>,
    /// One instance per bond, in topology order.
    pub bonds: Vec<InstanceRaw>,
}

impl SlotTransforms {
    /// Pack a frame, coloring atoms by kind.
    #[must_use]
    pub fn from_frame(
        frame: &CurrentFrame<'_>,
        topology: &Topology,
        display: &DisplayOptions,
        colors: &ColorOptions,
    ) -> Self {
        let mut out = Self::default();
        out.refill(frame, topology, display, colors);
        out
    }

    /// Repack in place, reusing allocations.
    pub fn refill(
        &mut self,
        frame: &CurrentFrame<'_>,
        topology: &Topology,
        display: &DisplayOptions,
        colors: &ColorOptions,
    ) {
        self.atoms.clear();
        self.atoms.extend(frame.atoms.iter().zip(&topology.atoms).map(
            |(&center, atom)| {
                InstanceRaw::new(
                    atom_transform(center, display.atom_scale),
                    colors.atom_color(&atom.kind),
                )
            },
        ));

        self.bonds.clear();
        self.bonds.extend(frame.bonds.iter().map(|&BondSegment { start, end }| {
            InstanceRaw::new(
                bond_transform(start, end, display.bond_radius),
                colors.bond,
            )
        }));
    }

    /// Raw bytes of the atom instances, ready for a buffer upload.
    #[must_use]
    pub fn atom_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.atoms)
    }

    /// Raw bytes of the bond instances, ready for a buffer upload.
    #[must_use]
    pub fn bond_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.bonds)
    }
}

/// Receives updated instance transforms for changed slots.
pub trait TransformSink {
    /// Replace the stored instances of `slot` with `transforms`.
    fn publish(&mut self, slot: usize, transforms: &SlotTransforms);

    /// Replace the slot outline instances (unit cubes, one per slot).
    ///
    /// Outlines are fixed after layout, so this is called once. Sinks that
    /// don't draw outlines can ignore it.
    fn publish_outlines(&mut self, _outlines: &[InstanceRaw]) {}
}

/// Draws the scene when asked; implemented by the rendering collaborator.
pub trait Renderer: TransformSink {
    /// Draw one frame and report how long drawing took.
    fn render(&mut self) -> Duration;
}
