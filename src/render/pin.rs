use crate::models::Listing;
use askama::Template;

pub const PIN_WIDTH: i32 = 56;
pub const PIN_HEIGHT: i32 = 75;

/// Map marker for one listing.
///
/// `left`/`top` place the marker so its bottom-center sits on the listing's
/// coordinate. `index` is the listing's position in the session set and is
/// exposed as `data-ad` for lookup on activation.
#[derive(Debug, Clone, PartialEq, Eq, Template)]
#[template(path = "pin.html")]
pub struct Pin {
    pub index: usize,
    pub left: i32,
    pub top: i32,
    pub avatar: String,
    pub active: bool,
}

pub fn render_pin(listing: &Listing, index: usize) -> Pin {
    Pin {
        index,
        left: listing.location.x - PIN_WIDTH / 2,
        top: listing.location.y - PIN_HEIGHT,
        avatar: listing.author.avatar.clone(),
        active: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{GeneratorParams, RandomDataGenerator};
    use scraper::{Html, Selector};

    fn listing() -> Listing {
        let mut listing = RandomDataGenerator::new(GeneratorParams {
            seed: Some(2),
            ..GeneratorParams::default()
        })
        .generate(1)
        .unwrap()
        .remove(0);
        listing.location.x = 400;
        listing.location.y = 200;
        listing
    }

    #[test]
    fn bottom_center_anchors_the_coordinate() {
        let pin = render_pin(&listing(), 3);
        assert_eq!(pin.left, 372);
        assert_eq!(pin.top, 125);
        assert_eq!(pin.index, 3);
        assert!(!pin.active);
    }

    #[test]
    fn markup_exposes_index_and_position() {
        let listing = listing();
        let mut pin = render_pin(&listing, 5);
        pin.active = true;

        let fragment = Html::parse_fragment(&pin.render().unwrap());
        let div = fragment
            .select(&Selector::parse("div.pin.pin--active").unwrap())
            .next()
            .expect("pin element");
        assert_eq!(div.value().attr("data-ad"), Some("5"));
        assert_eq!(div.value().attr("tabindex"), Some("0"));
        assert_eq!(div.value().attr("style"), Some("left: 372px; top: 125px"));

        let img = fragment
            .select(&Selector::parse("div.pin img.rounded").unwrap())
            .next()
            .expect("avatar image");
        assert_eq!(img.value().attr("src"), Some(listing.author.avatar.as_str()));
    }
}
