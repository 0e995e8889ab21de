use ndarray::ArrayView3;

/// A decoded photo: contiguous RGB bytes in row-major order.
///
/// Format conversion happens at I/O boundaries only; the domain layer
/// treats pixel data as opaque.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Copies the `width` × `height` block whose top-left corner is `(x, y)`.
    ///
    /// Returns `None` for an empty block or one that leaves the frame.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Option<Frame> {
        if width == 0 || height == 0 {
            return None;
        }
        if x.checked_add(width)? > self.width || y.checked_add(height)? > self.height {
            return None;
        }

        let channels = self.channels as usize;
        let src_stride = self.width as usize * channels;
        let row_len = width as usize * channels;
        let mut data = Vec::with_capacity(row_len * height as usize);
        for row in y as usize..(y + height) as usize {
            let start = row * src_stride + x as usize * channels;
            data.extend_from_slice(&self.data[start..start + row_len]);
        }
        Some(Frame::new(data, width, height, self.channels))
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}
