use wgpu::{Buffer, BufferUsages, Device, Queue};

use crate::config::FADE_ALPHA;
use crate::sketch::GpuSquare;

/// Squares uploaded before the first frame grows the buffer
const INITIAL_CAPACITY: usize = 1024;

/// Per-frame GPU data: the square instances and shared draw parameters
pub struct SketchBuffers {
    /// Storage buffer of `GpuSquare`, grown on demand
    pub squares_buffer: Buffer,
    /// Uniform buffer for draw parameters
    pub params_buffer: Buffer,
    /// Squares the storage buffer can hold
    capacity: usize,
    /// Squares written by the last upload
    count: u32,
}

/// Draw parameters shared by every sketch shader (16 bytes)
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawParams {
    /// Canvas size in logical pixels
    pub viewport: [f32; 2],
    /// Opacity of the per-frame fade layer
    pub fade_alpha: f32,
    /// 1 when the swapchain re-encodes to sRGB on write
    pub decode_srgb: u32,
}

impl SketchBuffers {
    pub fn new(device: &Device) -> Self {
        let params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("draw-params-buffer"),
            size: std::mem::size_of::<DrawParams>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            squares_buffer: create_squares_buffer(device, INITIAL_CAPACITY),
            params_buffer,
            capacity: INITIAL_CAPACITY,
            count: 0,
        }
    }

    /// Upload this frame's squares, reallocating when they no longer fit
    pub fn upload_squares(&mut self, device: &Device, queue: &Queue, squares: &[GpuSquare]) {
        if squares.len() > self.capacity {
            self.capacity = grown_capacity(self.capacity, squares.len());
            self.squares_buffer = create_squares_buffer(device, self.capacity);
            log::debug!("Square buffer grown to {} instances", self.capacity);
        }

        if !squares.is_empty() {
            queue.write_buffer(&self.squares_buffer, 0, bytemuck::cast_slice(squares));
        }
        self.count = squares.len() as u32;
    }

    /// Number of squares to draw
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Update draw parameters
    pub fn update_params(&self, queue: &Queue, viewport: (f64, f64), decode_srgb: bool) {
        let params = DrawParams {
            viewport: [viewport.0 as f32, viewport.1 as f32],
            fade_alpha: FADE_ALPHA,
            decode_srgb: decode_srgb as u32,
        };
        queue.write_buffer(&self.params_buffer, 0, bytemuck::bytes_of(&params));
    }
}

fn create_squares_buffer(device: &Device, capacity: usize) -> Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("squares-buffer"),
        size: (capacity * std::mem::size_of::<GpuSquare>()) as u64,
        usage: BufferUsages::STORAGE | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Smallest power-of-two multiple of `current` holding `required`
fn grown_capacity(current: usize, required: usize) -> usize {
    let mut capacity = current.max(1);
    while capacity < required {
        capacity *= 2;
    }
    capacity
}
