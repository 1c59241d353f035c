use crate::constants::CLEAR_COLOR;
use noel_core::{rotation_matrix, FrameCommands, Scene, ViewSettings};
use glam::Mat4;
use web_sys as web;

mod helpers;
mod points;

use points::{CloudBuffers, PointUniforms, PointsResources};

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    points: PointsResources,
    tree: CloudBuffers,
    star: CloudBuffers,
    snow: CloudBuffers,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement, scene: &Scene) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        // Shader colors are written as-is, so prefer a non-sRGB target.
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let points = points::create_points_resources(&device, format);
        let tree = CloudBuffers::new(
            &device,
            "tree_instances",
            scene.tree().positions(),
            Some(scene.tree().attributes()),
        );
        let star = CloudBuffers::new(
            &device,
            "star_instances",
            scene.star().positions(),
            Some(scene.star().attributes()),
        );
        let snow = CloudBuffers::new(&device, "snow_instances", scene.snow().positions(), None);
        log::info!(
            "[gpu] surface {}x{} {:?}, {} instances",
            config.width,
            config.height,
            format,
            tree.count + star.count + snow.count
        );

        let [r, g, b, a] = CLEAR_COLOR;
        Ok(Self {
            surface,
            device,
            queue,
            points,
            tree,
            star,
            snow,
            width: config.width,
            height: config.height,
            config,
            clear_color: wgpu::Color { r, g, b, a },
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
        }
    }

    /// Re-apply the surface configuration, e.g. after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn uniforms(&self, view: &ViewSettings, time: f32, model: Mat4) -> PointUniforms {
        PointUniforms {
            view_proj: view.camera.view_proj().to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            resolution: [self.width as f32, self.height as f32],
            time,
            size_multiplier: view.size_multiplier,
        }
    }

    /// Upload this frame's positions and draw tree, star and snow.
    pub fn render(
        &mut self,
        scene: &Scene,
        cmd: &FrameCommands,
        view: &ViewSettings,
    ) -> Result<(), wgpu::SurfaceError> {
        self.tree.upload(&self.queue, scene.tree().positions());
        self.star.upload(&self.queue, scene.star().positions());
        self.snow.upload(&self.queue, scene.snow().positions());

        let tree_u = self.uniforms(view, cmd.time, rotation_matrix(cmd.tree_rotation));
        let world_u = self.uniforms(view, cmd.time, Mat4::IDENTITY);
        self.queue.write_buffer(
            &self.points.tree_uniforms.buffer,
            0,
            bytemuck::bytes_of(&tree_u),
        );
        self.queue.write_buffer(
            &self.points.world_uniforms.buffer,
            0,
            bytemuck::bytes_of(&world_u),
        );

        let frame = self.surface.get_current_texture()?;
        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("points_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_vertex_buffer(0, self.points.quad_vb.slice(..));

            rpass.set_pipeline(&self.points.points_pipeline);
            for (cloud, uniforms) in [
                (&self.tree, &self.points.tree_uniforms),
                (&self.star, &self.points.world_uniforms),
            ] {
                let Some(attributes) = &cloud.attributes else {
                    continue;
                };
                if cloud.count == 0 {
                    continue;
                }
                rpass.set_bind_group(0, &uniforms.bind_group, &[]);
                rpass.set_vertex_buffer(1, cloud.positions.slice(..));
                rpass.set_vertex_buffer(2, attributes.slice(..));
                rpass.draw(0..6, 0..cloud.count);
            }

            if self.snow.count > 0 {
                rpass.set_pipeline(&self.points.snow_pipeline);
                rpass.set_bind_group(0, &self.points.world_uniforms.bind_group, &[]);
                rpass.set_vertex_buffer(1, self.snow.positions.slice(..));
                rpass.draw(0..6, 0..self.snow.count);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl Drop for GpuState {
    fn drop(&mut self) {
        self.tree.destroy();
        self.star.destroy();
        self.snow.destroy();
        self.points.destroy();
        log::info!("[gpu] buffers released");
    }
}
