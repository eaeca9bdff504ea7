#![forbid(unsafe_code)]

//! Named show/hide transitions understood by the presentation widget.

use std::fmt;
use std::str::FromStr;

macro_rules! transitions {
    ($($variant:ident => $key:literal, $name:literal;)+) => {
        /// A named show/hide transition.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum Transition {
            #[default]
            $($variant,)+
        }

        impl Transition {
            /// Every transition, in catalogue order.
            pub const ALL: &'static [Transition] = &[$(Transition::$variant,)+];

            /// Name handed to the presentation widget, e.g. `"fade up"`.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Transition::$variant => $name,)+
                }
            }

            /// Compact key without spaces, e.g. `"fadeup"`.
            pub const fn key(self) -> &'static str {
                match self {
                    $(Transition::$variant => $key,)+
                }
            }
        }
    };
}

transitions! {
    Scale => "scale", "scale";
    Fade => "fade", "fade";
    FadeUp => "fadeup", "fade up";
    FadeDown => "fadedown", "fade down";
    FadeLeft => "fadeleft", "fade left";
    FadeRight => "faderight", "fade right";
    HorizontalFlip => "horizontalflip", "horizontal flip";
    VerticalFlip => "verticalflip", "vertical flip";
    Drop => "drop", "drop";
    FlyLeft => "flyleft", "fly left";
    FlyRight => "flyright", "fly right";
    FlyUp => "flyup", "fly up";
    FlyDown => "flydown", "fly down";
    SwingLeft => "swingleft", "swing left";
    SwingRight => "swingright", "swing right";
    SwingUp => "swingup", "swing up";
    SwingDown => "swingdown", "swing down";
    Browse => "browse", "browse";
    BrowseRight => "browseright", "browse right";
    SlideDown => "slidedown", "slide down";
    SlideUp => "slideup", "slide up";
    SlideLeft => "slideleft", "slide left";
    SlideRight => "slideright", "slide right";
    Jiggle => "jiggle", "jiggle";
    Flash => "flash", "flash";
    Shake => "shake", "shake";
    Pulse => "pulse", "pulse";
    Tada => "tada", "tada";
    Bounce => "bounce", "bounce";
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transition name outside the catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTransition(pub String);

impl fmt::Display for UnknownTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown transition: {}", self.0)
    }
}

impl std::error::Error for UnknownTransition {}

impl FromStr for Transition {
    type Err = UnknownTransition;

    /// Accepts the display name (`"fade up"`) or the compact key (`"fadeup"`),
    /// ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Transition::ALL
            .iter()
            .copied()
            .find(|t| {
                t.as_str().eq_ignore_ascii_case(wanted) || t.key().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| UnknownTransition(s.to_string()))
    }
}
