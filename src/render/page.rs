use crate::controller::MapController;
use crate::form::NoticeForm;
use crate::render::{Dialog, Pin};
use askama::Template;

#[derive(Template)]
#[template(path = "page.html")]
struct MapPage<'a> {
    pins: &'a [Pin],
    dialog: &'a Dialog,
    form: &'a NoticeForm,
}

/// Render the whole map page for the controller's current state
pub fn render_page(map: &MapController, form: &NoticeForm) -> askama::Result<String> {
    MapPage {
        pins: map.pins(),
        dialog: map.dialog(),
        form,
    }
    .render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{Key, MapEvent};
    use crate::generator::{GeneratorParams, RandomDataGenerator};
    use scraper::{Html, Selector};

    fn map() -> MapController {
        let listings = RandomDataGenerator::new(GeneratorParams {
            seed: Some(8),
            ..GeneratorParams::default()
        })
        .generate(8)
        .unwrap();
        MapController::new(listings)
    }

    fn count(doc: &Html, css: &str) -> usize {
        doc.select(&Selector::parse(css).unwrap()).count()
    }

    #[test]
    fn idle_page_has_pins_and_hidden_dialog() {
        let form = NoticeForm::load().unwrap();
        let doc = Html::parse_document(&render_page(&map(), &form).unwrap());

        assert_eq!(count(&doc, ".tokyo__pin-map .pin:not(.pin__main)"), 8);
        assert_eq!(count(&doc, ".pin--active"), 0);
        assert_eq!(count(&doc, "#offer-dialog.hidden"), 1);
        assert_eq!(count(&doc, "form.notice__form select#capacity"), 1);
    }

    #[test]
    fn active_pin_and_dialog_show_in_the_page() {
        let mut map = map();
        map.dispatch(MapEvent::PinClick(5)).unwrap();
        let expected_title = map.listings()[5].offer.title.clone();

        let form = NoticeForm::load().unwrap();
        let doc = Html::parse_document(&render_page(&map, &form).unwrap());

        let active: Vec<_> = doc
            .select(&Selector::parse(".pin--active").unwrap())
            .map(|el| el.value().attr("data-ad").unwrap_or_default().to_string())
            .collect();
        assert_eq!(active, vec!["5"]);
        assert_eq!(count(&doc, "#offer-dialog.hidden"), 0);

        let title: String = doc
            .select(&Selector::parse("#offer-dialog .lodge__title").unwrap())
            .next()
            .unwrap()
            .text()
            .collect();
        assert_eq!(title, expected_title);

        map.dispatch(MapEvent::KeyDown(Key::Escape)).unwrap();
        let doc = Html::parse_document(&render_page(&map, &form).unwrap());
        assert_eq!(count(&doc, ".pin--active"), 0);
        assert_eq!(count(&doc, "#offer-dialog.hidden"), 1);
    }

    #[test]
    fn listing_text_is_not_expanded_as_markup() {
        let mut listings = RandomDataGenerator::new(GeneratorParams {
            seed: Some(8),
            ..GeneratorParams::default()
        })
        .generate(8)
        .unwrap();
        listings[0].offer.title = "Квартира {{form}}".to_string();
        listings[1].offer.title = "<b>Дворец</b> & сад".to_string();
        let mut map = MapController::new(listings);
        map.dispatch(MapEvent::PinClick(0)).unwrap();

        let form = NoticeForm::load().unwrap();
        let doc = Html::parse_document(&render_page(&map, &form).unwrap());
        assert_eq!(count(&doc, "form.notice__form"), 1);

        let title: String = doc
            .select(&Selector::parse(".lodge__title").unwrap())
            .next()
            .unwrap()
            .text()
            .collect();
        assert_eq!(title, "Квартира {{form}}");

        map.dispatch(MapEvent::PinClick(1)).unwrap();
        let doc = Html::parse_document(&render_page(&map, &form).unwrap());
        assert_eq!(count(&doc, ".lodge__title b"), 0);
        let title: String = doc
            .select(&Selector::parse(".lodge__title").unwrap())
            .next()
            .unwrap()
            .text()
            .collect();
        assert_eq!(title, "<b>Дворец</b> & сад");
    }
}
