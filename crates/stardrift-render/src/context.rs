//! GPU bring-up and swapchain plumbing.
//!
//! [`RenderContext`] owns the wgpu device, queue, and window surface. It is
//! created once per window and survives resizes; a lost or outdated surface
//! is reconfigured and the acquire retried before the frame is given up.

use std::sync::Arc;

use winit::window::Window;

/// Surface formats tried in order before settling for whatever the surface
/// offers. Both are sRGB so the backdrop colors land as authored.
const PREFERRED_FORMATS: [wgpu::TextureFormat; 2] = [
    wgpu::TextureFormat::Bgra8UnormSrgb,
    wgpu::TextureFormat::Rgba8UnormSrgb,
];

/// Fatal GPU bring-up failures. The app logs these once and exits; there is
/// nothing to render without a device.
#[derive(Debug, thiserror::Error)]
pub enum RenderContextError {
    #[error("no GPU adapter can drive this surface")]
    AdapterUnavailable,

    #[error("device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface creation failed: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
}

/// Per-frame surface acquisition failures, reduced to what the frame loop
/// acts on: skip the frame, or give up.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    /// The surface could not be recovered by reconfiguring.
    #[error("surface lost")]
    Lost,

    /// The GPU is out of memory; rendering cannot continue.
    #[error("out of GPU memory")]
    OutOfMemory,

    /// The frame did not arrive in time; skip it.
    #[error("surface timeout")]
    Timeout,
}

/// Owns the GPU device, queue, and the window surface it presents to.
pub struct RenderContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
}

impl RenderContext {
    /// Bring up the GPU for the given window.
    pub async fn new(window: Arc<Window>) -> Result<Self, RenderContextError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let size = window.inner_size();
        let surface = instance.create_surface(window)?;

        // A backdrop animation has no business on the discrete GPU of a
        // dual-GPU laptop.
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| RenderContextError::AdapterUnavailable)?;

        let info = adapter.get_info();
        log::info!(
            "using {} ({:?}, {:?})",
            info.name,
            info.backend,
            info.device_type
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("stardrift-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: pick_format(&caps.formats),
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: pick_present_mode(&caps.present_modes),
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Ok(Self {
            device,
            queue,
            surface,
            config,
        })
    }

    /// The format the surface was configured with; pipelines must target it.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Adopt new physical dimensions, clamped to 1×1. Unchanged dimensions
    /// skip the reconfigure.
    pub fn resize(&mut self, width: u32, height: u32) {
        let (width, height) = (width.max(1), height.max(1));
        if width == self.config.width && height == self.config.height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Acquire the next surface texture, recovering a lost or outdated
    /// surface once.
    pub fn get_current_texture(&self) -> Result<wgpu::SurfaceTexture, SurfaceError> {
        use wgpu::SurfaceError as Raw;

        match self.surface.get_current_texture() {
            Ok(frame) => Ok(frame),
            Err(Raw::Timeout) => Err(SurfaceError::Timeout),
            Err(Raw::OutOfMemory) => Err(SurfaceError::OutOfMemory),
            Err(Raw::Lost | Raw::Outdated | Raw::Other) => self.reacquire(),
        }
    }

    /// One reconfigure-and-retry; the frame is dropped if that also fails.
    fn reacquire(&self) -> Result<wgpu::SurfaceTexture, SurfaceError> {
        log::warn!("surface lost, reconfiguring");
        self.surface.configure(&self.device, &self.config);
        self.surface
            .get_current_texture()
            .map_err(|_| SurfaceError::Lost)
    }
}

/// [`RenderContext::new`] driven to completion on the calling thread.
pub fn init_render_context_blocking(
    window: Arc<Window>,
) -> Result<RenderContext, RenderContextError> {
    pollster::block_on(RenderContext::new(window))
}

fn pick_format(available: &[wgpu::TextureFormat]) -> wgpu::TextureFormat {
    PREFERRED_FORMATS
        .into_iter()
        .find(|f| available.contains(f))
        .or_else(|| available.iter().copied().find(|f| f.is_srgb()))
        .unwrap_or(available[0])
}

fn pick_present_mode(available: &[wgpu::PresentMode]) -> wgpu::PresentMode {
    // Fifo is vsync and universally supported; Mailbox is the fallback for
    // surfaces that somehow lack it.
    if available.contains(&wgpu::PresentMode::Fifo) {
        wgpu::PresentMode::Fifo
    } else {
        wgpu::PresentMode::Mailbox
    }
}
