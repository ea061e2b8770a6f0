//! Static descriptions of the supported COG panels
//!
//! Every panel is fully described by its [`PanelModel`]. The geometry and the
//! panel settings (PSR) constant of a model never change at runtime, so the
//! table is a `const fn` lookup.

use bit_field::BitField;

/// The supported panel sizes
///
/// The discriminant is the vendor's numeric model id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelModel {
    /// 1.54" panel, 152 x 152
    Epd154 = 0,
    /// 2.06" panel, 128 x 248
    Epd206 = 1,
    /// 2.13" panel, 104 x 212
    Epd213 = 2,
    /// 2.66" panel, 152 x 296
    Epd266 = 3,
    /// 2.71" panel, 176 x 264
    Epd271 = 4,
    /// 2.87" panel, 128 x 196
    Epd287 = 5,
    /// 2.90" panel, 168 x 386
    ///
    /// Has no PSR and is configured through two separate registers.
    Epd290 = 6,
    /// 3.70" panel, 240 x 416
    Epd370 = 7,
    /// 4.17" panel, 400 x 300
    Epd417 = 8,
    /// 4.37" panel, 176 x 480
    Epd437 = 9,
}

impl PanelModel {
    /// Every supported model, ordered by id
    pub const ALL: [PanelModel; 10] = [
        PanelModel::Epd154,
        PanelModel::Epd206,
        PanelModel::Epd213,
        PanelModel::Epd266,
        PanelModel::Epd271,
        PanelModel::Epd287,
        PanelModel::Epd290,
        PanelModel::Epd370,
        PanelModel::Epd417,
        PanelModel::Epd437,
    ];

    /// The vendor's numeric model id
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Looks up the static profile of this model
    pub const fn profile(self) -> PanelProfile {
        let (width, height, settings) = match self {
            PanelModel::Epd154 => (152, 152, [0xCF, 0x02]),
            PanelModel::Epd206 => (128, 248, [0xCF, 0x02]),
            PanelModel::Epd213 => (104, 212, [0xCF, 0x02]),
            PanelModel::Epd266 => (152, 296, [0xCF, 0x02]),
            PanelModel::Epd271 => (176, 264, [0xCF, 0x8D]),
            PanelModel::Epd287 => (128, 196, [0xCF, 0x8D]),
            PanelModel::Epd290 => (168, 386, [0x00, 0x00]),
            PanelModel::Epd370 => (240, 416, [0xCF, 0x8F]),
            PanelModel::Epd417 => (400, 300, [0x0F, 0x0E]),
            PanelModel::Epd437 => (176, 480, [0x0F, 0x0E]),
        };
        PanelProfile {
            model: self,
            width,
            height,
            settings: PanelSettings::new(settings[0], settings[1]),
        }
    }

    /// The 2.90" COG has no panel settings register. It reports a zero PSR and
    /// takes two single byte settings instead.
    pub const fn uses_alternate_settings(self) -> bool {
        matches!(self, PanelModel::Epd290)
    }

    /// Panels whose COG needs the border setting and the VCOM/data interval
    /// around the frame transfer of a fast update.
    pub const fn needs_border_management(self) -> bool {
        matches!(
            self,
            PanelModel::Epd154
                | PanelModel::Epd213
                | PanelModel::Epd266
                | PanelModel::Epd370
                | PanelModel::Epd437
        )
    }
}

/// Returned when a numeric id does not name a supported panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnknownPanelModel(pub u8);

impl TryFrom<u8> for PanelModel {
    type Error = UnknownPanelModel;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        PanelModel::ALL
            .get(usize::from(id))
            .copied()
            .ok_or(UnknownPanelModel(id))
    }
}

/// The two byte Panel Settings Register (PSR) constant of a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelSettings([u8; 2]);

impl PanelSettings {
    /// Creates panel settings from its two bytes
    pub const fn new(first: u8, second: u8) -> Self {
        PanelSettings([first, second])
    }

    /// The bytes as they are sent after the panel settings command
    pub const fn bytes(&self) -> [u8; 2] {
        self.0
    }
}

/// Derives the panel settings for a fast update from the base constant of a
/// panel.
///
/// Sets bit 4 of the first byte and bit 1 of the second. The base value is
/// taken by copy and never changed, so switching between fast and global
/// mode always starts from the profile constant again.
pub fn derive_fast_settings(base: PanelSettings) -> PanelSettings {
    let [mut first, mut second] = base.bytes();
    first.set_bit(4, true);
    second.set_bit(1, true);
    PanelSettings::new(first, second)
}

/// The static description of one panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelProfile {
    model: PanelModel,
    width: u16,
    height: u16,
    settings: PanelSettings,
}

impl PanelProfile {
    /// The model this profile describes
    pub const fn model(&self) -> PanelModel {
        self.model
    }

    /// Horizontal size in pixels
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Vertical size in pixels
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The PSR constant used for global updates
    pub const fn settings(&self) -> PanelSettings {
        self.settings
    }

    /// Number of bytes of each frame buffer for this panel
    pub const fn buffer_len(&self) -> usize {
        crate::buffer_len(self.width as usize, self.height as usize)
    }
}

impl From<PanelModel> for PanelProfile {
    fn from(model: PanelModel) -> Self {
        model.profile()
    }
}
