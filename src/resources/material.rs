/// How a surface treats alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlphaMode {
    #[default]
    Opaque,
    /// Alpha-tested; opaque where it passes.
    Premultiplied,
    Transparent,
    /// Alpha is zero everywhere.
    Off,
}

/// Texture slots the renderer fills before any scene texture.
///
/// Scene textures follow these, so a material referencing one of these
/// indices gets the built-in texture.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaticTexture {
    Black = 0,
    Invalid = 1,
    FlatNormal = 2,
    ScramblingRanking1spp = 3,
    SobolSequence = 4,
}

impl StaticTexture {
    pub const COUNT: u32 = 5;

    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self as u32
    }
}

/// Surface description: four texture indices and an alpha mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Material {
    pub diffuse_map: u32,
    pub specular_map: u32,
    pub normal_map: u32,
    pub emissive_map: u32,
    pub alpha_mode: AlphaMode,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse_map: StaticTexture::Black.index(),
            specular_map: StaticTexture::Black.index(),
            normal_map: StaticTexture::FlatNormal.index(),
            emissive_map: StaticTexture::Black.index(),
            alpha_mode: AlphaMode::Opaque,
        }
    }
}

impl Material {
    #[inline]
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        self.alpha_mode == AlphaMode::Opaque
    }

    #[inline]
    #[must_use]
    pub fn is_alpha_opaque(&self) -> bool {
        self.alpha_mode == AlphaMode::Premultiplied
    }

    #[inline]
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.alpha_mode == AlphaMode::Transparent
    }

    #[inline]
    #[must_use]
    pub fn is_off(&self) -> bool {
        self.alpha_mode == AlphaMode::Off
    }

    #[inline]
    #[must_use]
    pub fn is_emissive(&self) -> bool {
        self.emissive_map != StaticTexture::Black.index()
    }
}
