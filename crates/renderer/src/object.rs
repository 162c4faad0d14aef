//! Drawable objects: GPU resource ownership plus the render contract.

use std::rc::Rc;

use glam::Mat4;

use asset::Material;

use crate::context::{BufferId, DrawMode, RenderContext, Shader, VertexArrayId};
use crate::VertexLayout;

/// Uniform receiving the model matrix.
pub const MODEL_UNIFORM: &str = "u_m";
/// Uniforms receiving material properties, GLSL struct style.
pub const MATERIAL_AMBIENT_UNIFORM: &str = "u_material.kA";
pub const MATERIAL_DIFFUSE_UNIFORM: &str = "u_material.kD";
pub const MATERIAL_SPECULAR_UNIFORM: &str = "u_material.kS";
pub const MATERIAL_SHININESS_UNIFORM: &str = "u_material.shininess";

/// A mesh uploaded to the backend, ready to draw.
///
/// Owns its vertex/index buffers and the vertex array built against the
/// current shader. Dropping the object leaks the handles; call
/// [`DrawObject::dispose`] to release them. Consuming `self` there makes
/// use-after-release a compile error rather than a runtime one.
pub struct DrawObject {
    shader: Rc<dyn Shader>,
    vertex_buffer: BufferId,
    index_buffer: BufferId,
    vertex_array: VertexArrayId,
    index_count: u32,
    layout: VertexLayout,
    draw_mode: DrawMode,
    model_matrix: Mat4,
}

impl DrawObject {
    /// Upload `vertices`/`indices` and build the attribute binding for
    /// `shader`. The model matrix starts as identity.
    pub fn new(
        ctx: &mut dyn RenderContext,
        shader: Rc<dyn Shader>,
        vertices: &[f32],
        indices: &[u32],
        layout: VertexLayout,
        draw_mode: DrawMode,
    ) -> Self {
        let vertex_buffer = ctx.create_vertex_buffer(bytemuck::cast_slice(vertices));
        let index_buffer = ctx.create_index_buffer(bytemuck::cast_slice(indices));
        let vertex_array = build_vertex_array(ctx, shader.as_ref(), vertex_buffer, layout);

        Self {
            shader,
            vertex_buffer,
            index_buffer,
            vertex_array,
            index_count: indices.len() as u32,
            layout,
            draw_mode,
            model_matrix: Mat4::IDENTITY,
        }
    }

    /// Swap shaders: the vertex array is rebuilt against the new shader's
    /// attribute locations, the buffers stay.
    pub fn set_shader(&mut self, ctx: &mut dyn RenderContext, shader: Rc<dyn Shader>) {
        log::debug!("rebuilding vertex array for new shader");
        self.shader = shader;
        ctx.delete_vertex_array(self.vertex_array);
        self.vertex_array = build_vertex_array(ctx, self.shader.as_ref(), self.vertex_buffer, self.layout);
    }

    pub fn set_draw_mode(&mut self, draw_mode: DrawMode) {
        self.draw_mode = draw_mode;
    }

    /// Replace the model matrix wholesale. No composition with the previous
    /// transform.
    pub fn set_transformation(&mut self, transformation: Mat4) {
        self.model_matrix = transformation;
    }

    pub fn shader(&self) -> &dyn Shader {
        self.shader.as_ref()
    }

    pub fn draw_mode(&self) -> DrawMode {
        self.draw_mode
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.model_matrix
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Issue the indexed draw. Binding state is restored to none on exit.
    pub fn render(&self, ctx: &mut dyn RenderContext) {
        ctx.bind_vertex_array(Some(self.vertex_array));
        ctx.bind_index_buffer(Some(self.index_buffer));

        self.shader.activate();
        self.shader.set_uniform_mat4(MODEL_UNIFORM, self.model_matrix);

        ctx.draw_indexed(self.draw_mode, self.index_count);

        ctx.bind_vertex_array(None);
        ctx.bind_array_buffer(None);
        ctx.bind_index_buffer(None);
        self.shader.deactivate();
    }

    /// Release the vertex array and both buffers.
    pub fn dispose(self, ctx: &mut dyn RenderContext) {
        ctx.delete_vertex_array(self.vertex_array);
        ctx.delete_buffer(self.vertex_buffer);
        ctx.delete_buffer(self.index_buffer);
    }
}

/// [`DrawObject`] plus a material whose properties are pushed to the shader
/// before each draw.
pub struct ShadedDrawObject {
    object: DrawObject,
    material: Material,
}

impl ShadedDrawObject {
    pub fn new(
        material: Material,
        ctx: &mut dyn RenderContext,
        shader: Rc<dyn Shader>,
        vertices: &[f32],
        indices: &[u32],
        layout: VertexLayout,
        draw_mode: DrawMode,
    ) -> Self {
        Self {
            object: DrawObject::new(ctx, shader, vertices, indices, layout, draw_mode),
            material,
        }
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn object(&self) -> &DrawObject {
        &self.object
    }

    pub fn set_shader(&mut self, ctx: &mut dyn RenderContext, shader: Rc<dyn Shader>) {
        self.object.set_shader(ctx, shader);
    }

    pub fn set_draw_mode(&mut self, draw_mode: DrawMode) {
        self.object.set_draw_mode(draw_mode);
    }

    pub fn set_transformation(&mut self, transformation: Mat4) {
        self.object.set_transformation(transformation);
    }

    /// Upload the material uniforms, then run the base render step.
    pub fn render(&self, ctx: &mut dyn RenderContext) {
        let shader = self.object.shader();
        shader.activate();
        shader.set_uniform_vec3(MATERIAL_AMBIENT_UNIFORM, self.material.ambient);
        shader.set_uniform_vec3(MATERIAL_DIFFUSE_UNIFORM, self.material.diffuse);
        shader.set_uniform_vec3(MATERIAL_SPECULAR_UNIFORM, self.material.specular);
        shader.set_uniform_f32(MATERIAL_SHININESS_UNIFORM, self.material.shininess);
        self.object.render(ctx);
    }

    pub fn dispose(self, ctx: &mut dyn RenderContext) {
        self.object.dispose(ctx);
    }
}

fn build_vertex_array(
    ctx: &mut dyn RenderContext,
    shader: &dyn Shader,
    vertex_buffer: BufferId,
    layout: VertexLayout,
) -> VertexArrayId {
    let vertex_array = ctx.create_vertex_array();
    ctx.bind_vertex_array(Some(vertex_array));
    layout.configure(shader, vertex_buffer);
    ctx.bind_vertex_array(None);
    vertex_array
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;

    type Journal = Rc<RefCell<Vec<String>>>;

    /// Backend double writing every call into a shared journal.
    struct TestContext {
        journal: Journal,
        next_buffer: u32,
        next_vertex_array: u32,
    }

    impl TestContext {
        fn new(journal: Journal) -> Self {
            Self {
                journal,
                next_buffer: 0,
                next_vertex_array: 0,
            }
        }

        fn push(&self, entry: String) {
            self.journal.borrow_mut().push(entry);
        }
    }

    impl RenderContext for TestContext {
        fn create_vertex_buffer(&mut self, data: &[u8]) -> BufferId {
            self.next_buffer += 1;
            self.push(format!("create_vbo b{} ({} bytes)", self.next_buffer, data.len()));
            BufferId(self.next_buffer)
        }

        fn create_index_buffer(&mut self, data: &[u8]) -> BufferId {
            self.next_buffer += 1;
            self.push(format!("create_ibo b{} ({} bytes)", self.next_buffer, data.len()));
            BufferId(self.next_buffer)
        }

        fn delete_buffer(&mut self, buffer: BufferId) {
            self.push(format!("delete_buffer b{}", buffer.0));
        }

        fn create_vertex_array(&mut self) -> VertexArrayId {
            self.next_vertex_array += 1;
            self.push(format!("create_vao v{}", self.next_vertex_array));
            VertexArrayId(self.next_vertex_array)
        }

        fn delete_vertex_array(&mut self, vertex_array: VertexArrayId) {
            self.push(format!("delete_vao v{}", vertex_array.0));
        }

        fn bind_vertex_array(&mut self, vertex_array: Option<VertexArrayId>) {
            match vertex_array {
                Some(v) => self.push(format!("bind_vao v{}", v.0)),
                None => self.push("bind_vao none".into()),
            }
        }

        fn bind_array_buffer(&mut self, buffer: Option<BufferId>) {
            match buffer {
                Some(b) => self.push(format!("bind_abo b{}", b.0)),
                None => self.push("bind_abo none".into()),
            }
        }

        fn bind_index_buffer(&mut self, buffer: Option<BufferId>) {
            match buffer {
                Some(b) => self.push(format!("bind_ibo b{}", b.0)),
                None => self.push("bind_ibo none".into()),
            }
        }

        fn draw_indexed(&mut self, mode: DrawMode, index_count: u32) {
            self.push(format!("draw {mode:?} x{index_count}"));
        }
    }

    struct TestShader {
        journal: Journal,
    }

    impl Shader for TestShader {
        fn activate(&self) {
            self.journal.borrow_mut().push("shader_on".into());
        }

        fn deactivate(&self) {
            self.journal.borrow_mut().push("shader_off".into());
        }

        fn set_array_buffer(
            &self,
            attribute: &str,
            buffer: BufferId,
            components: u32,
            stride: u32,
            offset: u32,
        ) {
            self.journal.borrow_mut().push(format!(
                "attr {attribute} b{} comp{components} stride{stride} off{offset}",
                buffer.0
            ));
        }

        fn set_uniform_mat4(&self, name: &str, _value: Mat4) {
            self.journal.borrow_mut().push(format!("uniform_mat4 {name}"));
        }

        fn set_uniform_vec3(&self, name: &str, value: [f32; 3]) {
            self.journal
                .borrow_mut()
                .push(format!("uniform_vec3 {name} {value:?}"));
        }

        fn set_uniform_f32(&self, name: &str, value: f32) {
            self.journal
                .borrow_mut()
                .push(format!("uniform_f32 {name} {value}"));
        }
    }

    fn rig() -> (Journal, TestContext, Rc<dyn Shader>) {
        let journal: Journal = Rc::new(RefCell::new(Vec::new()));
        let ctx = TestContext::new(journal.clone());
        let shader: Rc<dyn Shader> = Rc::new(TestShader {
            journal: journal.clone(),
        });
        (journal, ctx, shader)
    }

    // 3 interleaved vertices and one triangle
    const VERTICES: [f32; 18] = [
        -1.0, -1.0, -1.0, 0.0, 0.0, 1.0, //
        1.0, -1.0, -1.0, 0.0, 0.0, 1.0, //
        -1.0, 1.0, -1.0, 0.0, 0.0, 1.0,
    ];
    const INDICES: [u32; 3] = [0, 1, 2];

    #[test]
    fn construction_uploads_buffers_and_configures_interleaved_layout() {
        let (journal, mut ctx, shader) = rig();
        let object = DrawObject::new(
            &mut ctx,
            shader,
            &VERTICES,
            &INDICES,
            VertexLayout::PositionNormal,
            DrawMode::Triangles,
        );

        assert_eq!(
            journal.borrow().as_slice(),
            &[
                "create_vbo b1 (72 bytes)",
                "create_ibo b2 (12 bytes)",
                "create_vao v1",
                "bind_vao v1",
                "attr a_position b1 comp3 stride24 off0",
                "attr a_normal b1 comp3 stride24 off12",
                "bind_vao none",
            ]
        );
        assert_eq!(object.model_matrix(), Mat4::IDENTITY);
        assert_eq!(object.index_count(), 3);
    }

    #[test]
    fn position_only_layout_binds_a_single_attribute() {
        let (journal, mut ctx, shader) = rig();
        let _object = DrawObject::new(
            &mut ctx,
            shader,
            &VERTICES[..9],
            &INDICES,
            VertexLayout::PositionOnly,
            DrawMode::Triangles,
        );

        let attrs: Vec<String> = journal
            .borrow()
            .iter()
            .filter(|e| e.starts_with("attr"))
            .cloned()
            .collect();
        assert_eq!(attrs, vec!["attr a_position b1 comp3 stride12 off0"]);
    }

    #[test]
    fn render_binds_uploads_draws_and_unbinds() {
        let (journal, mut ctx, shader) = rig();
        let object = DrawObject::new(
            &mut ctx,
            shader,
            &VERTICES,
            &INDICES,
            VertexLayout::PositionNormal,
            DrawMode::Triangles,
        );

        journal.borrow_mut().clear();
        object.render(&mut ctx);

        assert_eq!(
            journal.borrow().as_slice(),
            &[
                "bind_vao v1",
                "bind_ibo b2",
                "shader_on",
                "uniform_mat4 u_m",
                "draw Triangles x3",
                "bind_vao none",
                "bind_abo none",
                "bind_ibo none",
                "shader_off",
            ]
        );
    }

    #[test]
    fn draw_mode_and_transform_changes_show_up_in_render() {
        let (journal, mut ctx, shader) = rig();
        let mut object = DrawObject::new(
            &mut ctx,
            shader,
            &VERTICES,
            &INDICES,
            VertexLayout::PositionNormal,
            DrawMode::Triangles,
        );

        let moved = Mat4::from_translation(glam::vec3(1.0, 0.0, 0.0));
        object.set_draw_mode(DrawMode::Points);
        object.set_transformation(moved);
        assert_eq!(object.draw_mode(), DrawMode::Points);
        assert_eq!(object.model_matrix(), moved);

        journal.borrow_mut().clear();
        object.render(&mut ctx);
        assert!(journal.borrow().iter().any(|e| e == "draw Points x3"));
    }

    #[test]
    fn set_shader_rebuilds_the_vertex_array_but_keeps_buffers() {
        let (journal, mut ctx, shader) = rig();
        let mut object = DrawObject::new(
            &mut ctx,
            shader,
            &VERTICES,
            &INDICES,
            VertexLayout::PositionNormal,
            DrawMode::Triangles,
        );

        journal.borrow_mut().clear();
        let replacement: Rc<dyn Shader> = Rc::new(TestShader {
            journal: journal.clone(),
        });
        object.set_shader(&mut ctx, replacement);

        assert_eq!(
            journal.borrow().as_slice(),
            &[
                "delete_vao v1",
                "create_vao v2",
                "bind_vao v2",
                "attr a_position b1 comp3 stride24 off0",
                "attr a_normal b1 comp3 stride24 off12",
                "bind_vao none",
            ]
        );
    }

    #[test]
    fn dispose_releases_vertex_array_and_both_buffers() {
        let (journal, mut ctx, shader) = rig();
        let object = DrawObject::new(
            &mut ctx,
            shader,
            &VERTICES,
            &INDICES,
            VertexLayout::PositionNormal,
            DrawMode::Triangles,
        );

        journal.borrow_mut().clear();
        object.dispose(&mut ctx);

        assert_eq!(
            journal.borrow().as_slice(),
            &["delete_vao v1", "delete_buffer b1", "delete_buffer b2"]
        );
    }

    #[test]
    fn shaded_render_pushes_material_uniforms_before_drawing() {
        let (journal, mut ctx, shader) = rig();
        let object = ShadedDrawObject::new(
            Material::default(),
            &mut ctx,
            shader,
            &VERTICES,
            &INDICES,
            VertexLayout::PositionNormal,
            DrawMode::Triangles,
        );

        journal.borrow_mut().clear();
        object.render(&mut ctx);

        let journal = journal.borrow();
        let pos = |needle: &str| {
            journal
                .iter()
                .position(|e| e.starts_with(needle))
                .unwrap_or_else(|| panic!("missing journal entry '{needle}'"))
        };
        let draw = pos("draw");
        assert!(pos("uniform_vec3 u_material.kA") < draw);
        assert!(pos("uniform_vec3 u_material.kD") < draw);
        assert!(pos("uniform_vec3 u_material.kS") < draw);
        assert!(pos("uniform_f32 u_material.shininess") < draw);
        // base render still cleans up afterwards
        assert_eq!(journal.last().map(String::as_str), Some("shader_off"));
    }
}
