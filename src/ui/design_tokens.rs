// SPDX-License-Identifier: MPL-2.0
#![doc = r#"
# Design Tokens

This module defines the toast overlay's design tokens, following the W3C Design Tokens standard.

## Organization

- **Palette**: Base colors and level accents
- **Opacity**: Standardized opacity levels
- **Spacing**: Spacing scale (8px grid)
- **Sizing**: Component sizes
- **Typography**: Font size scale
- **Border**: Border width scale
- **Radius**: Border radii
- **Shadow**: Shadow definitions

## Examples

```
use matrix_notify::domain::Level;
use matrix_notify::ui::design_tokens::{palette, spacing, opacity};
use iced::Color;

// Toast background
let surface = Color {
    a: opacity::SURFACE,
    ..palette::BLACK
};

// Accent of an error toast
let accent = palette::accent(Level::Error);

// Use the spacing scale
let padding = spacing::MD; // 16px
```
"#]

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use crate::domain::Level;
    use iced::Color;

    // Base colors
    pub const BLACK: Color = Color::BLACK;
    pub const GRAY_400: Color = Color::from_rgb(0.4, 0.4, 0.4);

    // Neon scheme of the Matrix OS shell
    pub const NEON_CYAN: Color = Color::from_rgb(0.0, 1.0, 0.976); // #00fff9
    pub const TOAST_TEXT: Color = Color::from_rgb(0.902, 1.0, 1.0); // #e6ffff
    pub const TOAST_META: Color = Color::from_rgb(0.667, 0.933, 1.0); // #aaeeff

    // Level accents
    pub const INFO: Color = Color::from_rgb(0.561, 0.827, 1.0); // #8fd3ff
    pub const SUCCESS: Color = Color::from_rgb(0.486, 1.0, 0.698); // #7cffb2
    pub const WARNING: Color = Color::from_rgb(1.0, 0.820, 0.400); // #ffd166
    pub const ERROR: Color = Color::from_rgb(1.0, 0.420, 0.420); // #ff6b6b

    /// Accent color of a toast.
    #[must_use]
    pub fn accent(level: Level) -> Color {
        match level {
            Level::Info => INFO,
            Level::Success => SUCCESS,
            Level::Warning => WARNING,
            Level::Error => ERROR,
        }
    }
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const GLOW: f32 = 0.35;

    /// Toast background.
    pub const SURFACE: f32 = 0.75;
}

// ============================================================================
// Spacing Scale (8px grid)
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0; // 0.5 unit
    pub const XS: f32 = 8.0; // 1 unit
    pub const SM: f32 = 12.0; // 1.5 units
    pub const MD: f32 = 16.0; // 2 units
}

// ============================================================================
// Component Sizing
// ============================================================================

pub mod sizing {
    pub const TOAST_WIDTH: f32 = 340.0;
    pub const BASE_INPUT_WIDTH: f32 = 260.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    /// Toast title (level name).
    pub const TITLE_SM: f32 = 16.0;

    /// Toast message.
    pub const BODY: f32 = 14.0;

    /// Meta line (source, user, time, id).
    pub const CAPTION: f32 = 11.0;
}

// ============================================================================
// Border Widths
// ============================================================================

pub mod border {
    /// Level-coloured outline of a toast.
    pub const WIDTH_ACCENT: f32 = 2.0;
}

// ============================================================================
// Border Radii
// ============================================================================

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const LG: f32 = 12.0;
}

// ============================================================================
// Shadow Definitions
// ============================================================================

pub mod shadow {
    use super::{opacity, palette};
    use iced::{Color, Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    /// Cyan glow around toasts.
    pub const GLOW: Shadow = Shadow {
        color: Color {
            a: opacity::GLOW,
            ..palette::NEON_CYAN
        },
        offset: Vector::ZERO,
        blur_radius: 18.0,
    };
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    // Spacing validation
    assert!(spacing::XS > 0.0);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);

    // Opacity validation
    assert!(opacity::OVERLAY_SUBTLE < opacity::OVERLAY_MEDIUM);
    assert!(opacity::SURFACE > 0.0 && opacity::SURFACE < 1.0);

    // Typography validation
    assert!(typography::TITLE_SM > typography::BODY);
    assert!(typography::BODY > typography::CAPTION);

    // Border validation
    assert!(border::WIDTH_ACCENT > 0.0);
};

/// Blends `color` with black, for pressed states.
#[must_use]
pub fn darken(color: Color, amount: f32) -> Color {
    let keep = 1.0 - amount.clamp(0.0, 1.0);
    Color {
        r: color.r * keep,
        g: color.g * keep,
        b: color.b * keep,
        a: color.a,
    }
}
