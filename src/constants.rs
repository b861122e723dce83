/// Fixed palette, geometry and output manifests for the generated icons

pub mod palette {
    /// Fill color of the rounded rectangle (#007AFF)
    pub const FILL: [u8; 4] = [0, 122, 255, 255];

    /// Outline color of the rounded rectangle (#005AC8)
    pub const OUTLINE: [u8; 4] = [0, 90, 200, 255];

    pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];
}

pub mod geometry {
    /// Padding around the shape is size / PADDING_DIVISOR
    pub const PADDING_DIVISOR: u32 = 8;

    /// Corner radius is size / RADIUS_DIVISOR
    pub const RADIUS_DIVISOR: u32 = 10;

    /// Outline stroke is max(1, size / STROKE_DIVISOR)
    pub const STROKE_DIVISOR: u32 = 50;
}

pub mod manifest {
    /// Standalone PNGs written to the output directory: (filename, size)
    pub const STANDALONE_PNGS: &[(&str, u32)] = &[
        ("32x32.png", 32),
        ("128x128.png", 128),
        ("128x128@2x.png", 256),
        ("icon.png", 512),
    ];

    /// icon.ico is built from one raster of this size
    pub const ICO_SOURCE_SIZE: u32 = 256;

    /// Resolutions embedded in icon.ico
    pub const ICO_SIZES: &[u32] = &[16, 32, 48, 256];
    pub const ICO_FILE: &str = "icon.ico";

    /// Large intermediate PNG left next to the other assets
    pub const PREVIEW_SIZE: u32 = 1024;
    pub const PREVIEW_PNG: &str = "icon_1024.png";

    /// macOS iconset contents: (size, filename). Order and names must match
    /// what iconutil expects.
    pub const ICONSET_ENTRIES: &[(u32, &str)] = &[
        (16, "icon_16x16.png"),
        (32, "icon_16x16@2x.png"),
        (32, "icon_32x32.png"),
        (64, "icon_32x32@2x.png"),
        (128, "icon_128x128.png"),
        (256, "icon_128x128@2x.png"),
        (256, "icon_256x256.png"),
        (512, "icon_256x256@2x.png"),
        (512, "icon_512x512.png"),
        (1024, "icon_512x512@2x.png"),
    ];
    pub const ICONSET_DIR: &str = "icon.iconset";
    pub const ICNS_FILE: &str = "icon.icns";

    /// Written as icon.icns when no converter is available
    pub const PLACEHOLDER_ICNS: &[u8; 4] = b"icns";
}
