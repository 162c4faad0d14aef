//! Phong-style material properties for shaded objects.

/// Immutable material value: reflectance triples plus specular shininess.
/// Pure data; shading itself happens in the shader stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: f32,
}

impl Material {
    pub const fn new(
        ambient: [f32; 3],
        diffuse: [f32; 3],
        specular: [f32; 3],
        shininess: f32,
    ) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            shininess,
        }
    }
}

impl Default for Material {
    /// Placeholder the loader attaches to every mesh (no `.mtl` support).
    fn default() -> Self {
        Self::new([0.2, 0.2, 0.2], [0.5, 0.5, 0.5], [0.3, 0.3, 0.3], 20.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_material_values() {
        let m = Material::default();
        assert_eq!(m.ambient, [0.2, 0.2, 0.2]);
        assert_eq!(m.diffuse, [0.5, 0.5, 0.5]);
        assert_eq!(m.specular, [0.3, 0.3, 0.3]);
        assert_eq!(m.shininess, 20.0);
    }
}
