use crate::resources::material::AlphaMode;

/// Pixel formats a decoded texture may arrive in.
///
/// Only the subset the loader produces; decoding and transcoding are the
/// loader's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureFormat {
    #[default]
    Unknown,
    R8Unorm,
    Rg8Unorm,
    Rgba8Unorm,
    Rgba8Srgb,
    Rgba16Sfloat,
    Rgba32Sfloat,
    Bc1RgbaUnorm,
    Bc1RgbaSrgb,
    Bc2RgbaUnorm,
    Bc2RgbaSrgb,
    Bc3RgbaUnorm,
    Bc3RgbaSrgb,
    Bc4RUnorm,
    Bc4RSnorm,
    Bc5RgUnorm,
    Bc5RgSnorm,
    Bc6hRgbUfloat,
    Bc6hRgbSfloat,
    Bc7RgbaUnorm,
    Bc7RgbaSrgb,
}

impl TextureFormat {
    #[must_use]
    pub fn is_block_compressed(self) -> bool {
        matches!(
            self,
            Self::Bc1RgbaUnorm
                | Self::Bc1RgbaSrgb
                | Self::Bc2RgbaUnorm
                | Self::Bc2RgbaSrgb
                | Self::Bc3RgbaUnorm
                | Self::Bc3RgbaSrgb
                | Self::Bc4RUnorm
                | Self::Bc4RSnorm
                | Self::Bc5RgUnorm
                | Self::Bc5RgSnorm
                | Self::Bc6hRgbUfloat
                | Self::Bc6hRgbSfloat
                | Self::Bc7RgbaUnorm
                | Self::Bc7RgbaSrgb
        )
    }
}

/// A decoded texture owned by the scene until uploaded.
///
/// `mips` holds one buffer per `(array layer, mip)` pair, layer-major:
/// `mips[layer * mip_num + mip]`.
#[derive(Debug, Clone, Default)]
pub struct Texture {
    pub mips: Vec<Vec<u8>>,
    pub name: String,
    pub hash: u64,
    pub alpha_mode: AlphaMode,
    format: TextureFormat,
    width: u16,
    height: u16,
    depth: u16,
    mip_num: u16,
    array_size: u16,
}

impl Texture {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        format: TextureFormat,
        width: u16,
        height: u16,
        mip_num: u16,
        array_size: u16,
        mips: Vec<Vec<u8>>,
    ) -> Self {
        Self {
            mips,
            name: name.into(),
            hash: 0,
            alpha_mode: AlphaMode::Opaque,
            format,
            width,
            height,
            depth: 1,
            mip_num,
            array_size,
        }
    }

    /// Marks the texture as volumetric with `depth` slices per mip.
    #[must_use]
    pub fn with_depth(mut self, depth: u16) -> Self {
        self.depth = depth;
        self
    }

    /// Reinterprets the pixel data, e.g. to force an sRGB view.
    pub fn override_format(&mut self, format: TextureFormat) {
        self.format = format;
    }

    #[must_use]
    pub fn is_block_compressed(&self) -> bool {
        self.format.is_block_compressed()
    }

    /// Pixel data of one subresource, `None` when out of range.
    #[must_use]
    pub fn mip_data(&self, mip: u16, layer: u16) -> Option<&[u8]> {
        if mip >= self.mip_num || layer >= self.array_size {
            return None;
        }
        let index = usize::from(layer) * usize::from(self.mip_num) + usize::from(mip);
        self.mips.get(index).map(Vec::as_slice)
    }

    /// Total bytes held by this texture.
    #[must_use]
    pub fn byte_size(&self) -> usize {
        self.mips.iter().map(Vec::len).sum()
    }

    #[inline]
    #[must_use]
    pub fn format(&self) -> TextureFormat {
        self.format
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    #[must_use]
    pub fn depth(&self) -> u16 {
        self.depth
    }

    #[inline]
    #[must_use]
    pub fn mip_num(&self) -> u16 {
        self.mip_num
    }

    #[inline]
    #[must_use]
    pub fn array_size(&self) -> u16 {
        self.array_size
    }
}
