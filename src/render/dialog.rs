use crate::models::Listing;
use askama::Template;

pub const PRICE_SUFFIX: &str = " ₽/ночь";
pub const DEFAULT_AVATAR: &str = "img/avatars/default.png";

/// Filled-in lodge card shown inside the dialog panel
#[derive(Debug, Clone, PartialEq, Eq, Template)]
#[template(path = "lodge.html")]
pub struct LodgeCard {
    pub title: String,
    pub price: String,
    pub address: String,
    pub type_label: String,
    pub rooms_and_guests: String,
    pub checkin_time: String,
    pub features: Vec<String>,
    pub description: String,
}

pub fn render_details(listing: &Listing) -> LodgeCard {
    let offer = &listing.offer;
    LodgeCard {
        title: offer.title.clone(),
        price: format!("{}{}", offer.price, PRICE_SUFFIX),
        address: offer.address.clone(),
        type_label: offer.kind.label().to_string(),
        rooms_and_guests: format!("Для {} гостей в {} комнатах", offer.guests, offer.rooms),
        checkin_time: format!(
            "Заезд после {}, выезд до {}",
            offer.checkin, offer.checkout
        ),
        features: offer.features.clone(),
        description: offer.description.clone(),
    }
}

/// The `#offer-dialog` panel together with the author avatar in its header
#[derive(Debug, Clone, PartialEq, Eq, Template)]
#[template(path = "dialog.html")]
pub struct Dialog {
    pub hidden: bool,
    pub avatar: String,
    pub panel: Option<LodgeCard>,
}

impl Default for Dialog {
    fn default() -> Self {
        Self {
            hidden: true,
            avatar: DEFAULT_AVATAR.to_string(),
            panel: None,
        }
    }
}

impl Dialog {
    /// Replace the panel content with `listing` and show the dialog
    pub fn open(&mut self, listing: &Listing) {
        self.panel = Some(render_details(listing));
        self.avatar = listing.author.avatar.clone();
        self.hidden = false;
    }

    pub fn close(&mut self) {
        self.hidden = true;
    }
}
