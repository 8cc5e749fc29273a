use std::sync::Arc;

use glim_math::{DMat4, DVec2, Point3, Vec3};

use crate::hittable::HittableList;
use crate::material::Material;
use crate::triangle::Triangle;

/// Raw indexed mesh arrays, as a loader or a procedural builder produces
/// them. Positions, normals and uvs are indexed independently, three
/// indices per face.
#[derive(Default)]
pub struct RawMeshInfo {
    pub positions: Vec<Point3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<DVec2>,
    pub position_indices: Vec<u32>,
    pub normal_indices: Vec<u32>,
    pub uv_indices: Vec<u32>,
}

/// An indexed triangle mesh with one material.
///
/// The object-to-world transform is baked into the positions at
/// construction; normals are kept as authored. The mesh itself is not
/// hittable. [`Mesh::triangles`] builds one [`Triangle`] per face, each
/// sharing the mesh through an `Arc`, and those go into the scene
/// (usually under their own BVH).
pub struct Mesh {
    positions: Vec<Point3>,
    normals: Vec<Vec3>,
    uvs: Vec<DVec2>,
    position_indices: Vec<u32>,
    normal_indices: Vec<u32>,
    uv_indices: Vec<u32>,
    smooth_shading: bool,
    material: Arc<dyn Material>,
}

impl Mesh {
    pub fn new(
        info: RawMeshInfo,
        object_to_world: DMat4,
        smooth_shading: bool,
        material: Arc<dyn Material>,
    ) -> Self {
        let positions = info
            .positions
            .iter()
            .map(|p| object_to_world.transform_point3(*p))
            .collect();
        Self {
            positions,
            normals: info.normals,
            uvs: info.uvs,
            position_indices: info.position_indices,
            normal_indices: info.normal_indices,
            uv_indices: info.uv_indices,
            smooth_shading,
            material,
        }
    }

    pub fn face_count(&self) -> usize {
        self.position_indices.len() / 3
    }

    /// One triangle per face, ready to add to a scene or a BVH.
    pub fn triangles(self: &Arc<Self>) -> HittableList {
        let mut list = HittableList::new();
        for face in 0..self.face_count() {
            list.add(Arc::new(Triangle::new(Arc::clone(self), face)));
        }
        list
    }

    pub(crate) fn position(&self, face: usize, corner: usize) -> Point3 {
        self.positions[self.position_indices[face * 3 + corner] as usize]
    }

    pub(crate) fn normal(&self, face: usize, corner: usize) -> Vec3 {
        self.normals[self.normal_indices[face * 3 + corner] as usize]
    }

    pub(crate) fn uv(&self, face: usize, corner: usize) -> DVec2 {
        self.uvs[self.uv_indices[face * 3 + corner] as usize]
    }

    pub(crate) fn has_normals(&self) -> bool {
        !self.normals.is_empty() && !self.normal_indices.is_empty()
    }

    pub(crate) fn has_uvs(&self) -> bool {
        !self.uvs.is_empty() && !self.uv_indices.is_empty()
    }

    pub(crate) fn smooth_shading(&self) -> bool {
        self.smooth_shading
    }

    pub(crate) fn material(&self) -> &dyn Material {
        self.material.as_ref()
    }
}
