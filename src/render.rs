pub mod text;
pub mod window;

use bytemuck::{Pod, Zeroable};
use std::num::NonZeroU64;
use std::time::Duration;

use crate::error::RenderError;
use crate::grid::{Cell, Grid};

/// Side of one cell on screen, in logical pixels.
pub const CELL_SIZE: u32 = 20;

/// Something that can show a grid frame by frame.
///
/// The driver calls `should_stop`, then `render`, then `pace` once per
/// frame. Renderers only ever see the grid through a shared borrow.
pub trait Renderer {
    fn render(&mut self, grid: &Grid<Cell>) -> Result<(), RenderError>;

    /// Polled once per frame; `true` ends the run.
    fn should_stop(&mut self) -> bool {
        false
    }

    /// Waits out the rest of the frame.
    fn pace(&mut self, interval: Duration) {
        std::thread::sleep(interval);
    }

    /// Whether the final frame stays on screen once the step budget is spent.
    fn holds_last_frame(&self) -> bool {
        false
    }
}

// Uniforms for the cell shader
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct RenderParams {
    pub width: u32,
    pub height: u32,
    pub cell_size: f32,
    pub _padding: f32, // 16-byte alignment
}

impl RenderParams {
    pub fn new(width: u32, height: u32, scale_factor: f64) -> Self {
        Self {
            width,
            height,
            cell_size: (CELL_SIZE as f64 * scale_factor) as f32,
            _padding: 0.0,
        }
    }
}

/// Grid cells widened to the `array<u32>` layout the shader reads.
pub fn cell_buffer_data(grid: &Grid<Cell>) -> Vec<u32> {
    grid.as_slice().iter().map(|&c| c as u32).collect()
}

pub fn create_render_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Render Bind Group Layout"),
        entries: &[
            // RenderParams Uniform (Binding 0)
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(std::mem::size_of::<RenderParams>() as u64),
                },
                count: None,
            },
            // Cell Buffer (Binding 1)
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: true },
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
    })
}

pub fn create_render_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    render_param_buffer: &wgpu::Buffer,
    cell_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Render Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry { binding: 0, resource: render_param_buffer.as_entire_binding() },
            wgpu::BindGroupEntry { binding: 1, resource: cell_buffer.as_entire_binding() },
        ],
    })
}
