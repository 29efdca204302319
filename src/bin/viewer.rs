//! Splatnav Viewer
//!
//! Interactive splat viewer: walk with WASD over a mesh scene overlaid with
//! a streaming point-splat layer. Left-drag orbits, scroll zooms, Space
//! jumps, and a double-click recenters the orbit pivot on the splat surface.
//!
//! The frame loop redraws unconditionally every tick (`ControlFlow::Poll`
//! plus a redraw request from `about_to_wait`), so streaming updates and
//! pivot changes never need an explicit redraw request.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use glam::Vec3;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowAttributes, WindowId};

use splatnav_engine::camera::{CameraRig, OrbitControls};
use splatnav_engine::input::{KeyCode, Position};
use splatnav_engine::render::{GpuContext, GpuContextConfig, MeshBuffer, MeshPass};
use splatnav_engine::splat::{encode_splt, ChunkedSource, SplatCloud, SplatEvent, SplatPass, SplatStream};
use splatnav_engine::viewer::recenter::{self, ClickOutcome};
use splatnav_engine::viewer::{scene, LoadProgress, NavigationState, ViewerConfig};

/// Bytes of splat stream fed to the decoder per frame. Bounded so streaming
/// stays cooperative with the frame loop.
const STREAM_CHUNK_BYTES: usize = 64 * 1024;

/// Point count of the synthetic demo cloud used without a configured file.
const DEMO_SPLAT_COUNT: usize = 40_000;

/// Map a winit key code onto the engine's windowing-agnostic key codes.
fn map_key(key: winit::keyboard::KeyCode) -> KeyCode {
    use winit::keyboard::KeyCode as K;
    match key {
        K::KeyW => KeyCode::W,
        K::KeyA => KeyCode::A,
        K::KeyS => KeyCode::S,
        K::KeyD => KeyCode::D,
        K::Space => KeyCode::Space,
        K::ArrowUp => KeyCode::ArrowUp,
        K::ArrowDown => KeyCode::ArrowDown,
        K::ArrowLeft => KeyCode::ArrowLeft,
        K::ArrowRight => KeyCode::ArrowRight,
        K::Escape => KeyCode::Escape,
        _ => KeyCode::Unknown,
    }
}

struct ViewerApp {
    config: ViewerConfig,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    mesh_pass: Option<MeshPass>,
    splat_pass: Option<SplatPass>,
    marker_index: usize,
    marker_position: Vec3,

    rig: CameraRig,
    orbit: OrbitControls,
    nav: NavigationState,

    cloud: SplatCloud,
    stream: SplatStream,
    source: Option<ChunkedSource>,
    stream_failed: bool,
    progress: LoadProgress,

    cursor: Position,
    start_time: Instant,
    last_frame: Instant,
    frame_count: u32,
    last_fps_update: Instant,
    fps: f32,
}

impl ViewerApp {
    fn new() -> Self {
        let config = ViewerConfig::load_or_default(Path::new("viewer.json"));

        let rig = CameraRig::with_position(config.initial_camera, 16.0 / 9.0);
        let mut orbit = OrbitControls::new();
        orbit.rotate_speed = config.rotate_speed;
        orbit.damping_factor = config.damping_factor;
        let nav = NavigationState::with_params(config.locomotion_params());

        Self {
            config,
            window: None,
            gpu: None,
            mesh_pass: None,
            splat_pass: None,
            marker_index: 0,
            marker_position: Vec3::ZERO,
            rig,
            orbit,
            nav,
            cloud: SplatCloud::new(),
            stream: SplatStream::new(),
            source: None,
            stream_failed: false,
            progress: LoadProgress::new(),
            cursor: Position::default(),
            start_time: Instant::now(),
            last_frame: Instant::now(),
            frame_count: 0,
            last_fps_update: Instant::now(),
            fps: 0.0,
        }
    }

    fn initialize(&mut self, window: Arc<Window>) {
        let size = window.inner_size();
        self.rig.resize(size.width, size.height);

        let gpu = GpuContext::new(
            Arc::clone(&window),
            GpuContextConfig {
                vsync: self.config.vsync,
                high_performance: true,
            },
        );

        let mut mesh_pass = MeshPass::new(&gpu);

        let (grid_vertices, grid_indices) = scene::grid_mesh();
        mesh_pass.add_lines(MeshBuffer {
            label: "Grid",
            vertex_buffer: gpu.create_vertex_buffer("Grid Vertices", &grid_vertices),
            index_buffer: gpu.create_index_buffer("Grid Indices", &grid_indices),
            index_count: grid_indices.len() as u32,
        });

        let (cube_vertices, cube_indices) = scene::cube_mesh();
        mesh_pass.add_triangles(MeshBuffer {
            label: "Cube",
            vertex_buffer: gpu.create_vertex_buffer("Cube Vertices", &cube_vertices),
            index_buffer: gpu.create_index_buffer("Cube Indices", &cube_indices),
            index_count: cube_indices.len() as u32,
        });

        // The marker ball rewrites its vertices on every recenter, so its
        // vertex buffer must accept updates.
        let (marker_vertices, marker_indices) = scene::marker_mesh(self.marker_position);
        let marker_vertex_buffer = gpu.create_dynamic_vertex_buffer(
            "Marker Vertices",
            (scene::MARKER_VERTEX_COUNT * std::mem::size_of::<splatnav_engine::render::MeshVertex>())
                as u64,
        );
        gpu.write_buffer(&marker_vertex_buffer, &marker_vertices);
        self.marker_index = mesh_pass.add_triangles(MeshBuffer {
            label: "Marker",
            vertex_buffer: marker_vertex_buffer,
            index_buffer: gpu.create_index_buffer("Marker Indices", &marker_indices),
            index_count: marker_indices.len() as u32,
        });

        let splat_pass = SplatPass::new(&gpu);

        self.source = Some(self.open_splat_source());
        self.gpu = Some(gpu);
        self.mesh_pass = Some(mesh_pass);
        self.splat_pass = Some(splat_pass);
        self.window = Some(window);
    }

    /// Open the configured .splt file, falling back to the synthetic demo
    /// stream on any problem.
    fn open_splat_source(&self) -> ChunkedSource {
        if let Some(path) = &self.config.splat_path {
            match ChunkedSource::from_file(path) {
                Ok(source) => {
                    println!("Streaming splats from {}", path.display());
                    return source;
                }
                Err(e) => {
                    eprintln!("Failed to open {}: {e}; showing demo cloud", path.display());
                }
            }
        }
        ChunkedSource::from_bytes(encode_splt(&scene::demo_splat_points(DEMO_SPLAT_COUNT)))
    }

    /// Feed the next stream chunk into the decoder and fold the resulting
    /// notifications into the progress gate.
    fn pump_stream(&mut self) {
        if self.stream_failed {
            return;
        }
        let Some(source) = self.source.as_mut() else {
            return;
        };
        let Some(chunk) = source.next_chunk(STREAM_CHUNK_BYTES) else {
            return;
        };
        match self.stream.feed(chunk, &mut self.cloud) {
            Ok(events) => {
                for event in events {
                    match event {
                        SplatEvent::Update => {
                            // Always-redraw loop: the next frame shows it.
                        }
                        SplatEvent::Loaded {
                            total_loaded,
                            num_displayed,
                        } => {
                            self.progress.on_loaded(
                                self.cloud.total_size(),
                                total_loaded,
                                num_displayed,
                            );
                        }
                    }
                }
            }
            Err(e) => {
                eprintln!("Splat stream error: {e}");
                self.stream_failed = true;
            }
        }
    }

    fn handle_click(&mut self) {
        let Some(gpu) = &self.gpu else { return };
        let now_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let outcome = recenter::handle_click(
            &mut self.nav,
            now_ms,
            &self.cloud,
            &self.rig,
            self.cursor.to_tuple(),
            gpu.dimensions(),
            &mut self.orbit,
            &mut self.marker_position,
        );
        if let ClickOutcome::Recentered(point) = outcome {
            let (vertices, _) = scene::marker_mesh(point);
            if let Some(mesh_pass) = &self.mesh_pass {
                gpu.write_buffer(
                    &mesh_pass.triangle_mesh(self.marker_index).vertex_buffer,
                    &vertices,
                );
            }
        }
    }

    fn update_title(&mut self, now: Instant) {
        self.frame_count += 1;
        let elapsed = now.duration_since(self.last_fps_update).as_secs_f32();
        if elapsed >= 1.0 {
            self.fps = self.frame_count as f32 / elapsed;
            self.frame_count = 0;
            self.last_fps_update = now;

            if let Some(window) = &self.window {
                let loading = if self.progress.spinner_hidden() {
                    ""
                } else {
                    " | loading splats..."
                };
                window.set_title(&format!(
                    "Splatnav Viewer | FPS: {:.0} | {} / {} splats{}",
                    self.fps,
                    self.cloud.len(),
                    self.cloud.total_size(),
                    loading
                ));
            }
        }
    }

    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let acquired = match &self.gpu {
            Some(gpu) => gpu.get_current_texture(),
            None => return,
        };
        let frame = match acquired {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    let (width, height) = gpu.dimensions();
                    gpu.resize(width, height);
                }
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                eprintln!("GPU out of memory; exiting");
                event_loop.exit();
                return;
            }
            Err(_) => return, // Timeout etc: skip this frame and self-correct
        };

        let Some(gpu) = &self.gpu else { return };
        let (Some(mesh_pass), Some(splat_pass)) = (self.mesh_pass.as_mut(), self.splat_pass.as_mut())
        else {
            return;
        };
        let color_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let time = self.start_time.elapsed().as_secs_f32();
        mesh_pass.update_uniforms(
            gpu,
            self.rig.view_projection_matrix(),
            self.rig.position.to_array(),
            time,
        );
        splat_pass.prepare(gpu, &self.cloud, &self.rig, self.orbit.target);

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });
        mesh_pass.render(&mut encoder, &color_view, &gpu.depth_view);
        splat_pass.render(&mut encoder, &color_view, &gpu.depth_view);
        gpu.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let attrs = WindowAttributes::default()
                .with_title("Splatnav Viewer | loading splats...")
                .with_inner_size(PhysicalSize::new(1280, 720));
            let window = Arc::new(
                event_loop
                    .create_window(attrs)
                    .expect("Failed to create window"),
            );
            self.initialize(window);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if key == winit::keyboard::KeyCode::Escape
                        && event.state == ElementState::Pressed
                    {
                        event_loop.exit();
                        return;
                    }
                    self.nav
                        .handle_key(map_key(key), event.state == ElementState::Pressed);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    let pressed = state == ElementState::Pressed;
                    if pressed {
                        self.handle_click();
                    }
                    self.orbit.handle_mouse_button(pressed);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Position::new(position.x as f32, position.y as f32);
                self.orbit.handle_mouse_move(self.cursor.x, self.cursor.y);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
                self.orbit.handle_scroll(scroll);
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(new_size.width, new_size.height);
                }
                self.rig.resize(new_size.width, new_size.height);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = now.duration_since(self.last_frame).as_secs_f32();
                self.last_frame = now;

                self.update_title(now);
                self.pump_stream();
                self.nav.advance(dt, &mut self.rig, &mut self.orbit);
                self.render_frame(event_loop);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() {
    println!("===========================================");
    println!("   Splatnav Viewer");
    println!("===========================================");
    println!();
    println!("Controls: WASD/Arrows Move, Space Jump (grounded)");
    println!("Left-drag Orbit, Scroll Zoom, Double-click Recenter, ESC Exit");
    println!();

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = ViewerApp::new();
    event_loop.run_app(&mut app).expect("Event loop error");
}
