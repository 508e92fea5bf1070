//! Headless `GlContext` that records commands instead of executing them.
//!
//! Shader compilation performs a structural check of the GLSL text and
//! linking resolves `attribute` / `uniform` declarations, so the build and
//! bind sequence can be exercised without a GPU.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::shader::ShaderStage;

use super::context::{BufferUsage, ClearColor, GlContext, Topology};

/// One command issued against a [`RecordingContext`].
///
/// Queries (status, info logs, location lookups) are not recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    Viewport { x: i32, y: i32, width: i32, height: i32 },
    ClearColor(ClearColor),
    ClearColorBuffer,
    CreateBuffer(u32),
    BindArrayBuffer(Option<u32>),
    ArrayBufferData { bytes: Vec<u8>, usage: BufferUsage },
    CreateShader { shader: u32, stage: ShaderStage },
    ShaderSource(u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader { program: u32, shader: u32 },
    LinkProgram(u32),
    DeleteProgram(u32),
    UseProgram(Option<u32>),
    EnableVertexAttribArray(u32),
    VertexAttribPointer { index: u32, components: i32, normalized: bool, stride: i32, offset: i32 },
    UniformMatrix4 { location: Option<u32>, transpose: bool, value: [f32; 16] },
    DrawArrays { topology: Topology, first: i32, count: i32 },
}

#[derive(Debug)]
struct ShaderObject {
    stage: ShaderStage,
    source: String,
    compiled: bool,
    info_log: String,
}

#[derive(Debug, Default)]
struct ProgramObject {
    attached: Vec<u32>,
    linked: bool,
    info_log: String,
    attributes: Vec<String>,
    uniforms: Vec<String>,
}

#[derive(Debug, Default)]
struct State {
    next_id: u32,
    calls: Vec<GlCall>,
    shaders: HashMap<u32, ShaderObject>,
    programs: HashMap<u32, ProgramObject>,
    buffers: HashMap<u32, Vec<u8>>,
    bound_array_buffer: Option<u32>,
    current_program: Option<u32>,
}

impl State {
    fn alloc(&mut self) -> u32 {
        // 0 is the GL null object.
        self.next_id += 1;
        self.next_id
    }
}

/// Failure injection for [`RecordingContext`].
#[derive(Debug, Clone, Default)]
struct Faults {
    compile: Option<ShaderStage>,
    link: bool,
    create_buffer: bool,
    empty_info_logs: bool,
}

/// In-memory `GlContext`. Handles are plain `u32` object names starting at 1.
#[derive(Debug, Default)]
pub struct RecordingContext {
    state: RefCell<State>,
    faults: Faults,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every shader of `stage` fails to compile regardless of its source.
    pub fn failing_compile(mut self, stage: ShaderStage) -> Self {
        self.faults.compile = Some(stage);
        self
    }

    /// Every link attempt fails.
    pub fn failing_link(mut self) -> Self {
        self.faults.link = true;
        self
    }

    /// `create_buffer` reports an allocation failure.
    pub fn failing_buffer_creation(mut self) -> Self {
        self.faults.create_buffer = true;
        self
    }

    /// Info logs come back empty, as some drivers do on failure.
    pub fn with_empty_info_logs(mut self) -> Self {
        self.faults.empty_info_logs = true;
        self
    }

    /// Commands recorded so far, in issue order.
    pub fn calls(&self) -> Vec<GlCall> {
        self.state.borrow().calls.clone()
    }

    /// Only the `DrawArrays` commands.
    pub fn draw_calls(&self) -> Vec<GlCall> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|c| matches!(c, GlCall::DrawArrays { .. }))
            .cloned()
            .collect()
    }

    /// Bytes last uploaded to `buffer`.
    pub fn buffer_contents(&self, buffer: u32) -> Option<Vec<u8>> {
        self.state.borrow().buffers.get(&buffer).cloned()
    }

    pub fn current_program(&self) -> Option<u32> {
        self.state.borrow().current_program
    }

    /// Shader objects not yet deleted.
    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    /// Program objects not yet deleted.
    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    fn record(&self, call: GlCall) {
        self.state.borrow_mut().calls.push(call);
    }

    fn log_text(&self, text: String) -> String {
        if self.faults.empty_info_logs { String::new() } else { text }
    }

    fn link(&self, state: &State, program: u32) -> Result<(Vec<String>, Vec<String>), String> {
        if self.faults.link {
            return Err("ERROR: link failed".to_string());
        }

        let attached = state
            .programs
            .get(&program)
            .map(|p| p.attached.clone())
            .ok_or_else(|| format!("ERROR: unknown program {program}"))?;

        let mut vertex = None;
        let mut fragment = None;
        for id in attached {
            let Some(shader) = state.shaders.get(&id) else {
                return Err(format!("ERROR: attached shader {id} does not exist"));
            };
            if !shader.compiled {
                return Err(format!("ERROR: attached shader {id} is not compiled"));
            }
            let slot = match shader.stage {
                ShaderStage::Vertex => &mut vertex,
                ShaderStage::Fragment => &mut fragment,
            };
            if slot.replace(shader).is_some() {
                return Err(format!("ERROR: more than one {} shader attached", shader.stage));
            }
        }

        let vertex = vertex.ok_or("ERROR: missing vertex shader")?;
        let fragment = fragment.ok_or("ERROR: missing fragment shader")?;

        let produced = declarations(&vertex.source, "varying");
        for consumed in declarations(&fragment.source, "varying") {
            if !produced.contains(&consumed) {
                return Err(format!(
                    "ERROR: varying '{consumed}' not written by the vertex shader"
                ));
            }
        }

        let attributes = declarations(&vertex.source, "attribute");
        let mut uniforms = declarations(&vertex.source, "uniform");
        for name in declarations(&fragment.source, "uniform") {
            if !uniforms.contains(&name) {
                uniforms.push(name);
            }
        }

        Ok((attributes, uniforms))
    }
}

impl GlContext for RecordingContext {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type UniformLocation = u32;

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(GlCall::Viewport { x, y, width, height });
    }

    fn clear_color(&self, color: ClearColor) {
        self.record(GlCall::ClearColor(color));
    }

    fn clear_color_buffer(&self) {
        self.record(GlCall::ClearColorBuffer);
    }

    fn create_buffer(&self) -> Result<u32, String> {
        if self.faults.create_buffer {
            return Err("out of memory".to_string());
        }
        let mut state = self.state.borrow_mut();
        let id = state.alloc();
        state.buffers.insert(id, Vec::new());
        state.calls.push(GlCall::CreateBuffer(id));
        Ok(id)
    }

    fn bind_array_buffer(&self, buffer: Option<u32>) {
        let mut state = self.state.borrow_mut();
        state.bound_array_buffer = buffer;
        state.calls.push(GlCall::BindArrayBuffer(buffer));
    }

    fn array_buffer_data(&self, data: &[u8], usage: BufferUsage) {
        let mut state = self.state.borrow_mut();
        if let Some(id) = state.bound_array_buffer {
            state.buffers.insert(id, data.to_vec());
        }
        state.calls.push(GlCall::ArrayBufferData { bytes: data.to_vec(), usage });
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        let id = state.alloc();
        state.shaders.insert(
            id,
            ShaderObject { stage, source: String::new(), compiled: false, info_log: String::new() },
        );
        state.calls.push(GlCall::CreateShader { shader: id, stage });
        Ok(id)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        let mut state = self.state.borrow_mut();
        if let Some(obj) = state.shaders.get_mut(&shader) {
            obj.source = source.to_string();
        }
        state.calls.push(GlCall::ShaderSource(shader));
    }

    fn compile_shader(&self, shader: u32) {
        let mut state = self.state.borrow_mut();
        if let Some(obj) = state.shaders.get_mut(&shader) {
            let result = if self.faults.compile == Some(obj.stage) {
                Err("ERROR: 0:1: compilation rejected".to_string())
            } else {
                check_glsl(&obj.source)
            };
            match result {
                Ok(()) => {
                    obj.compiled = true;
                    obj.info_log.clear();
                }
                Err(log) => {
                    obj.compiled = false;
                    obj.info_log = self.log_text(log);
                }
            }
        }
        state.calls.push(GlCall::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.state.borrow().shaders.get(&shader).is_some_and(|s| s.compiled)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .map(|s| s.info_log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: u32) {
        let mut state = self.state.borrow_mut();
        state.shaders.remove(&shader);
        state.calls.push(GlCall::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        let id = state.alloc();
        state.programs.insert(id, ProgramObject::default());
        state.calls.push(GlCall::CreateProgram(id));
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        let mut state = self.state.borrow_mut();
        if let Some(obj) = state.programs.get_mut(&program) {
            obj.attached.push(shader);
        }
        state.calls.push(GlCall::AttachShader { program, shader });
    }

    fn link_program(&self, program: u32) {
        let mut state = self.state.borrow_mut();
        let result = self.link(&state, program);
        if let Some(obj) = state.programs.get_mut(&program) {
            match result {
                Ok((attributes, uniforms)) => {
                    obj.linked = true;
                    obj.info_log.clear();
                    obj.attributes = attributes;
                    obj.uniforms = uniforms;
                }
                Err(log) => {
                    obj.linked = false;
                    obj.info_log = self.log_text(log);
                    obj.attributes.clear();
                    obj.uniforms.clear();
                }
            }
        }
        state.calls.push(GlCall::LinkProgram(program));
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.state.borrow().programs.get(&program).is_some_and(|p| p.linked)
    }

    fn program_info_log(&self, program: u32) -> String {
        self.state
            .borrow()
            .programs
            .get(&program)
            .map(|p| p.info_log.clone())
            .unwrap_or_default()
    }

    fn delete_program(&self, program: u32) {
        let mut state = self.state.borrow_mut();
        state.programs.remove(&program);
        if state.current_program == Some(program) {
            state.current_program = None;
        }
        state.calls.push(GlCall::DeleteProgram(program));
    }

    fn use_program(&self, program: Option<u32>) {
        let mut state = self.state.borrow_mut();
        state.current_program = program;
        state.calls.push(GlCall::UseProgram(program));
    }

    fn attrib_location(&self, program: u32, name: &str) -> Option<u32> {
        let state = self.state.borrow();
        let obj = state.programs.get(&program).filter(|p| p.linked)?;
        obj.attributes.iter().position(|a| a == name).map(|i| i as u32)
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<u32> {
        let state = self.state.borrow();
        let obj = state.programs.get(&program).filter(|p| p.linked)?;
        obj.uniforms.iter().position(|u| u == name).map(|i| i as u32)
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(GlCall::EnableVertexAttribArray(index));
    }

    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        components: i32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        self.record(GlCall::VertexAttribPointer { index, components, normalized, stride, offset });
    }

    fn uniform_matrix4(&self, location: Option<&u32>, transpose: bool, value: &[f32; 16]) {
        self.record(GlCall::UniformMatrix4 { location: location.copied(), transpose, value: *value });
    }

    fn draw_arrays(&self, topology: Topology, first: i32, count: i32) {
        self.record(GlCall::DrawArrays { topology, first, count });
    }
}

// ── GLSL inspection ───────────────────────────────────────────────────────

/// Removes comments and preprocessor directives, keeping line breaks so
/// diagnostics still point at the original line.
fn preprocess(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    while let Some(ch) = chars.next() {
        let next = chars.peek().copied();
        match (ch, next) {
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if c == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
                out.push(' ');
            }
            ('/', Some('/')) => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            _ => out.push(ch),
        }
    }

    out.lines()
        .map(|line| if line.trim_start().starts_with('#') { "" } else { line })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Structural check standing in for a real GLSL front end.
///
/// Errors use the `ERROR: 0:<line>: ...` shape most drivers emit.
fn check_glsl(source: &str) -> Result<(), String> {
    let source = preprocess(source);
    let mut open: Vec<(char, usize)> = Vec::new();
    let mut line = 1;

    for ch in source.chars() {
        match ch {
            '\n' => line += 1,
            '(' | '{' | '[' => open.push((ch, line)),
            ')' | '}' | ']' => {
                let expected = match ch {
                    ')' => '(',
                    '}' => '{',
                    _ => '[',
                };
                match open.pop() {
                    Some((o, _)) if o == expected => {}
                    _ => return Err(format!("ERROR: 0:{line}: '{ch}' : syntax error")),
                }
            }
            _ => {}
        }
    }

    if let Some((ch, at)) = open.pop() {
        return Err(format!("ERROR: 0:{at}: '{ch}' : syntax error: unexpected end of file"));
    }

    let trimmed = source.trim_end();
    if !trimmed.is_empty() && !trimmed.ends_with(['}', ';']) {
        return Err(format!("ERROR: 0:{line}: '' : syntax error: unexpected end of file"));
    }

    let has_main = source
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .windows(2)
        .any(|w| w == ["void", "main"]);
    if !has_main {
        return Err(format!("ERROR: 0:{line}: 'main' : function not defined"));
    }

    Ok(())
}

/// Names declared at global scope with `qualifier` (e.g. `uniform`), in order.
fn declarations(source: &str, qualifier: &str) -> Vec<String> {
    let source = preprocess(source);
    let mut names = Vec::new();
    for stmt in source.split([';', '{', '}']) {
        let stmt = stmt.trim_start();
        let Some(rest) = stmt.strip_prefix(qualifier) else { continue };
        if !rest.starts_with(char::is_whitespace) {
            continue;
        }
        // `uniform mat4 a, b[2];` declares both `a` and `b`.
        for declarator in rest.split(',') {
            let head = declarator.split('[').next().unwrap_or(declarator);
            let Some(name) = head.split_whitespace().last() else { continue };
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}
