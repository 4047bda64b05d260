use super::pacer::Pacer;
use super::{Colour, Point, Rect, Surface, WHITE};
use gfx;
use gfx::traits::FactoryExt;
use gfx::Device;
use gfx_device_gl::{CommandBuffer, Device as GlDevice, Factory, Resources};
use glutin::dpi::LogicalSize;
use thiserror::Error;
use tracing::info;

const WINDOW_TITLE: &str = "Simple Life";

pub type ColorFormat = gfx::format::Rgba8;
pub type DepthFormat = gfx::format::DepthStencil;

gfx_defines! {
    vertex Vertex {
        position: [f32; 2] = "a_Position",
        colour: [f32; 4] = "a_Color",
    }

    pipeline pipe {
        vbuf: gfx::VertexBuffer<Vertex> = (),
        out: gfx::RenderTarget<ColorFormat> = "Target0",
    }
}

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Failed to open window: {0}")]
    Window(#[from] glutin::CreationError),

    #[error("Failed to build render pipeline: {0}")]
    Pipeline(String),

    #[error("Failed to present frame: {0}")]
    Present(#[from] glutin::ContextError),
}

// Pixel coordinates (origin top left, y down) to normalised device
// coordinates (origin centre, y up).
fn pixel_to_ndc(x: u32, y: u32, width: f32, height: f32) -> [f32; 2] {
    [
        x as f32 / width * 2. - 1.,
        1. - y as f32 / height * 2.,
    ]
}

/// An OpenGL window. Rectangles and lines are batched per frame and uploaded
/// as two vertex buffers when the frame is presented.
pub struct GlSurface {
    width: f32,
    height: f32,
    window: glutin::WindowedContext,
    device: GlDevice,
    factory: Factory,
    events_loop: glutin::EventsLoop,
    fill: gfx::PipelineState<Resources, pipe::Meta>,
    stroke: gfx::PipelineState<Resources, pipe::Meta>,
    encoder: gfx::Encoder<Resources, CommandBuffer>,
    out: gfx::handle::RenderTargetView<Resources, ColorFormat>,
    triangles: Vec<Vertex>,
    lines: Vec<Vertex>,
    pacer: Pacer,
}

impl GlSurface {
    #[allow(clippy::missing_errors_doc)]
    pub fn new(width: u32, height: u32, ticks_per_second: u16) -> Result<Self, SurfaceError> {
        let events_loop = glutin::EventsLoop::new();
        let window_size = LogicalSize::new(width.into(), height.into());
        let builder = glutin::WindowBuilder::new()
            .with_title(WINDOW_TITLE)
            .with_dimensions(window_size)
            .with_resizable(false);
        let context = glutin::ContextBuilder::new().with_vsync(true);
        let (window, device, mut factory, out, _) =
            gfx_window_glutin::init::<ColorFormat, DepthFormat>(builder, context, &events_loop)?;
        let encoder = factory.create_command_buffer().into();

        let shaders = factory
            .create_shader_set(
                include_bytes!("shaders/flat.glslv"),
                include_bytes!("shaders/flat.glslf"),
            )
            .map_err(|e| SurfaceError::Pipeline(format!("{:?}", e)))?;
        let fill = factory
            .create_pipeline_state(
                &shaders,
                gfx::Primitive::TriangleList,
                gfx::state::Rasterizer::new_fill(),
                pipe::new(),
            )
            .map_err(|e| SurfaceError::Pipeline(format!("{:?}", e)))?;
        let stroke = factory
            .create_pipeline_state(
                &shaders,
                gfx::Primitive::LineList,
                gfx::state::Rasterizer::new_fill(),
                pipe::new(),
            )
            .map_err(|e| SurfaceError::Pipeline(format!("{:?}", e)))?;

        info!(width, height, ticks_per_second, "opened window");
        Ok(Self {
            width: width as f32,
            height: height as f32,
            window,
            device,
            factory,
            events_loop,
            fill,
            stroke,
            encoder,
            out,
            triangles: Vec::new(),
            lines: Vec::new(),
            pacer: Pacer::new(ticks_per_second),
        })
    }

    fn vertex(&self, x: u32, y: u32, colour: Colour) -> Vertex {
        Vertex {
            position: pixel_to_ndc(x, y, self.width, self.height),
            colour,
        }
    }

    fn draw_batch(&mut self, lines: bool) {
        let (vertices, pso) = if lines {
            (&self.lines, &self.stroke)
        } else {
            (&self.triangles, &self.fill)
        };
        if vertices.is_empty() {
            return;
        }
        let (vbuf, slice) = self
            .factory
            .create_vertex_buffer_with_slice(&vertices[..], ());
        let data = pipe::Data {
            vbuf,
            out: self.out.clone(),
        };
        self.encoder.draw(&slice, pso, &data);
    }
}

impl Surface for GlSurface {
    type Error = SurfaceError;

    fn draw_rectangle(&mut self, rect: Rect, colour: Colour) -> Result<(), SurfaceError> {
        let right = rect.x.saturating_add(rect.w);
        let bottom = rect.y.saturating_add(rect.h);
        let top_left = self.vertex(rect.x, rect.y, colour);
        let top_right = self.vertex(right, rect.y, colour);
        let bottom_left = self.vertex(rect.x, bottom, colour);
        let bottom_right = self.vertex(right, bottom, colour);
        self.triangles.extend_from_slice(&[
            top_left,
            bottom_left,
            bottom_right,
            bottom_right,
            top_right,
            top_left,
        ]);
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point, colour: Colour) -> Result<(), SurfaceError> {
        let start = self.vertex(from.x, from.y, colour);
        let end = self.vertex(to.x, to.y, colour);
        self.lines.extend_from_slice(&[start, end]);
        Ok(())
    }

    fn poll_quit(&mut self) -> bool {
        let mut quit = false;
        self.events_loop.poll_events(|polled_event| {
            if let glutin::Event::WindowEvent { event, .. } = polled_event {
                match event {
                    glutin::WindowEvent::KeyboardInput {
                        input:
                            glutin::KeyboardInput {
                                virtual_keycode: Some(glutin::VirtualKeyCode::Escape),
                                ..
                            },
                        ..
                    }
                    | glutin::WindowEvent::CloseRequested => quit = true,
                    _ => {}
                }
            }
        });
        quit
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        self.encoder.clear(&self.out, WHITE);
        self.draw_batch(false);
        self.draw_batch(true);
        self.encoder.flush(&mut self.device);
        self.window.swap_buffers()?;
        self.device.cleanup();
        self.triangles.clear();
        self.lines.clear();
        Ok(())
    }

    fn sleep_until_next_tick(&mut self) {
        self.pacer.wait();
    }
}
