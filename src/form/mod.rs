//! Notice form: a typed model of the submission form parsed from its markup,
//! plus the field synchronization rules that run on change events.

pub mod fields;
pub mod sync;

use crate::models::{LodgingType, UnknownLodgingType};
use askama::Template;
use fields::{NumberField, SelectField, SelectOption, TextField};
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use tracing::{debug, info};

pub use sync::{allowed_capacities, TITLE_TOO_SHORT};

/// Form markup shipped with the page
pub const NOTICE_FORM_HTML: &str = include_str!("../../assets/notice_form.html");

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("invalid selector {css:?}: {reason}")]
    Selector { css: String, reason: String },

    #[error("form markup has no {0:?} field")]
    MissingField(String),

    #[error("field {field:?} has no option {value:?}")]
    UnknownOption { field: String, value: String },

    #[error(transparent)]
    UnknownType(#[from] UnknownLodgingType),

    #[error("field {field:?} holds a non-numeric value {value:?}")]
    InvalidNumber { field: String, value: String },
}

/// Field change events, carrying the new value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    TitleInput(String),
    AddressInput(String),
    TypeChange(String),
    PriceInput(String),
    TimeInChange(String),
    TimeOutChange(String),
    RoomsChange(String),
    CapacityChange(String),
}

/// Values of an accepted submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub title: String,
    pub address: String,
    #[serde(rename = "type")]
    pub kind: LodgingType,
    pub price: u32,
    pub timein: String,
    pub timeout: String,
    pub rooms: u32,
    pub capacity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted(Submission),
    /// Names of the fields that failed validation
    Blocked(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Template)]
#[template(path = "notice_form.html")]
pub struct NoticeForm {
    pub title: TextField,
    pub address: TextField,
    pub lodging_type: SelectField,
    pub price: NumberField,
    pub timein: SelectField,
    pub timeout: SelectField,
    pub room_number: SelectField,
    pub capacity: SelectField,
}

impl NoticeForm {
    /// Parse the bundled markup and bring dependent fields in line
    pub fn load() -> Result<Self, FormError> {
        let mut form = Self::parse(NOTICE_FORM_HTML)?;
        form.sync_type_with_price()?;
        form.sync_rooms_with_capacity()?;
        Ok(form)
    }

    /// Build the form model from `form.notice__form` markup
    pub fn parse(html: &str) -> Result<Self, FormError> {
        let document = Html::parse_fragment(html);
        let form_selector = selector("form.notice__form")?;
        let form = document
            .select(&form_selector)
            .next()
            .ok_or_else(|| FormError::MissingField("form.notice__form".to_string()))?;

        let parsed = Self {
            title: parse_text(form, "title")?,
            address: parse_text(form, "address")?,
            lodging_type: parse_select(form, "type")?,
            price: parse_number(form, "price")?,
            timein: parse_select(form, "timein")?,
            timeout: parse_select(form, "timeout")?,
            room_number: parse_select(form, "room_number")?,
            capacity: parse_select(form, "capacity")?,
        };
        debug!("Parsed notice form with {} type options", parsed.lodging_type.options.len());
        Ok(parsed)
    }

    /// Apply one field change and run the rules attached to that field
    pub fn dispatch(&mut self, event: FormEvent) -> Result<(), FormError> {
        debug!("Form event: {:?}", event);
        match event {
            FormEvent::TitleInput(value) => {
                self.title.value = value;
                self.validate_title();
            }
            FormEvent::AddressInput(value) => self.address.value = value,
            FormEvent::TypeChange(value) => {
                let index = self.lodging_type.require(&value)?;
                value.parse::<LodgingType>()?;
                self.lodging_type.selected = index;
                self.sync_type_with_price()?;
            }
            FormEvent::PriceInput(value) => self.price.value = value,
            // Check-in and check-out move together, so both must offer the value
            FormEvent::TimeInChange(value) | FormEvent::TimeOutChange(value) => {
                let timein = self.timein.require(&value)?;
                let timeout = self.timeout.require(&value)?;
                self.timein.selected = timein;
                self.timeout.selected = timeout;
            }
            FormEvent::RoomsChange(value) => {
                let index = self.room_number.require(&value)?;
                if allowed_capacities(&value).is_none() {
                    return Err(FormError::UnknownOption {
                        field: self.room_number.name.clone(),
                        value,
                    });
                }
                self.room_number.selected = index;
                self.sync_rooms_with_capacity()?;
            }
            FormEvent::CapacityChange(value) => self.capacity.select_value(&value)?,
        }
        Ok(())
    }

    /// Flag every field and either hand back the values or block submission
    pub fn submit(&mut self) -> Result<SubmitOutcome, FormError> {
        let invalid = self.flag_invalid();
        if !invalid.is_empty() {
            info!("Submission blocked, invalid fields: {}", invalid.join(", "));
            return Ok(SubmitOutcome::Blocked(invalid));
        }

        let submission = Submission {
            title: self.title.value.clone(),
            address: self.address.value.clone(),
            kind: self.lodging_type.value().parse()?,
            price: self.price.number().ok_or_else(|| FormError::InvalidNumber {
                field: self.price.name.clone(),
                value: self.price.value.clone(),
            })?,
            timein: self.timein.value().to_string(),
            timeout: self.timeout.value().to_string(),
            rooms: select_number(&self.room_number)?,
            capacity: select_number(&self.capacity)?,
        };
        info!("Submission accepted: {}", submission.title);
        Ok(SubmitOutcome::Accepted(submission))
    }
}

fn selector(css: &str) -> Result<Selector, FormError> {
    Selector::parse(css).map_err(|e| FormError::Selector {
        css: css.to_string(),
        reason: format!("{:?}", e),
    })
}

fn find_field<'a>(form: ElementRef<'a>, name: &str) -> Result<ElementRef<'a>, FormError> {
    let field_selector = selector(&format!(r#"[name="{}"]"#, name))?;
    let found = form.select(&field_selector).next();
    found.ok_or_else(|| FormError::MissingField(name.to_string()))
}

fn label_for(form: ElementRef<'_>, id: &str) -> Result<String, FormError> {
    let label_selector = selector(&format!(r#"label[for="{}"]"#, id))?;
    let label = form
        .select(&label_selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();
    Ok(label)
}

fn numeric_attr(el: ElementRef<'_>, name: &str, attr: &str) -> Result<Option<u64>, FormError> {
    el.value()
        .attr(attr)
        .map(|raw| {
            raw.trim().parse().map_err(|_| FormError::InvalidNumber {
                field: format!("{}[{}]", name, attr),
                value: raw.to_string(),
            })
        })
        .transpose()
}

fn parse_text(form: ElementRef<'_>, name: &str) -> Result<TextField, FormError> {
    let el = find_field(form, name)?;
    Ok(TextField {
        name: name.to_string(),
        label: label_for(form, el.value().id().unwrap_or(name))?,
        value: el.value().attr("value").unwrap_or_default().to_string(),
        required: el.value().attr("required").is_some(),
        min_length: numeric_attr(el, name, "minlength")?.map(|n| n as usize),
        max_length: numeric_attr(el, name, "maxlength")?.map(|n| n as usize),
        custom_validity: String::new(),
        invalid: false,
    })
}

fn parse_number(form: ElementRef<'_>, name: &str) -> Result<NumberField, FormError> {
    let el = find_field(form, name)?;
    let to_u32 = |n: u64| u32::try_from(n).unwrap_or(u32::MAX);
    Ok(NumberField {
        name: name.to_string(),
        label: label_for(form, el.value().id().unwrap_or(name))?,
        value: el.value().attr("value").unwrap_or_default().to_string(),
        required: el.value().attr("required").is_some(),
        min: numeric_attr(el, name, "min")?.map(to_u32).unwrap_or(0),
        max: numeric_attr(el, name, "max")?.map(to_u32).unwrap_or(u32::MAX),
        invalid: false,
    })
}

fn parse_select(form: ElementRef<'_>, name: &str) -> Result<SelectField, FormError> {
    let el = find_field(form, name)?;
    let option_selector = selector("option")?;

    let mut selected = 0;
    let mut options = Vec::new();
    for (i, option) in el.select(&option_selector).enumerate() {
        let label = option.text().collect::<String>().trim().to_string();
        if option.value().attr("selected").is_some() {
            selected = i;
        }
        options.push(SelectOption {
            value: option
                .value()
                .attr("value")
                .map(str::to_string)
                .unwrap_or_else(|| label.clone()),
            label,
            disabled: option.value().attr("disabled").is_some(),
        });
    }

    Ok(SelectField {
        name: name.to_string(),
        label: label_for(form, el.value().id().unwrap_or(name))?,
        options,
        selected,
        invalid: false,
    })
}

fn select_number(field: &SelectField) -> Result<u32, FormError> {
    field.value().parse().map_err(|_| FormError::InvalidNumber {
        field: field.name.clone(),
        value: field.value().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_TITLE: &str = "Уютная квартира в самом центре Токио у парка";

    fn filled() -> NoticeForm {
        let mut form = NoticeForm::load().unwrap();
        form.dispatch(FormEvent::TitleInput(VALID_TITLE.into())).unwrap();
        form.dispatch(FormEvent::AddressInput("600, 350".into())).unwrap();
        form
    }

    #[test]
    fn bundled_markup_parses() {
        let form = NoticeForm::load().unwrap();
        assert_eq!(form.title.min_length, Some(30));
        assert_eq!(form.title.max_length, Some(100));
        assert!(form.title.required);
        assert_eq!(form.lodging_type.value(), "flat");
        assert_eq!(form.price.min, 1000);
        assert_eq!(form.price.max, 1_000_000);
        assert_eq!(form.timein.value(), "12:00");
        assert_eq!(form.room_number.value(), "1");
        assert_eq!(form.capacity.value(), "1");
        assert_eq!(form.title.label, "Заголовок объявления");
    }

    #[test]
    fn missing_field_is_reported() {
        let html = r#"<form class="notice__form"><input name="title"></form>"#;
        assert_eq!(
            NoticeForm::parse(html),
            Err(FormError::MissingField("address".into()))
        );
    }

    #[test]
    fn rendered_form_parses_back_to_same_state() {
        let mut form = filled();
        form.dispatch(FormEvent::RoomsChange("2".into())).unwrap();
        form.dispatch(FormEvent::TypeChange("house".into())).unwrap();
        let reparsed = NoticeForm::parse(&form.render().unwrap()).unwrap();
        assert_eq!(reparsed.room_number.value(), "2");
        assert_eq!(reparsed.capacity, form.capacity);
        assert_eq!(reparsed.price.min, 5000);
        assert_eq!(reparsed.title.value, VALID_TITLE);
    }

    #[test]
    fn valid_form_is_accepted() {
        let mut form = filled();
        form.dispatch(FormEvent::RoomsChange("3".into())).unwrap();
        form.dispatch(FormEvent::CapacityChange("3".into())).unwrap();
        form.dispatch(FormEvent::TimeOutChange("14:00".into())).unwrap();

        let outcome = form.submit().unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Accepted(Submission {
                title: VALID_TITLE.into(),
                address: "600, 350".into(),
                kind: LodgingType::Flat,
                price: 1000,
                timein: "14:00".into(),
                timeout: "14:00".into(),
                rooms: 3,
                capacity: 3,
            })
        );
    }

    #[test]
    fn invalid_fields_block_submission_and_get_flagged() {
        let mut form = NoticeForm::load().unwrap();
        form.dispatch(FormEvent::TitleInput("коротко".into())).unwrap();
        form.dispatch(FormEvent::PriceInput("50".into())).unwrap();

        let outcome = form.submit().unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Blocked(vec!["title".into(), "address".into(), "price".into()])
        );
        assert!(form.title.invalid);
        assert!(form.address.invalid);
        assert!(form.price.invalid);
        assert!(!form.capacity.invalid);
        assert!(form.render().unwrap().contains(r#"class="invalid""#));
    }

    #[test]
    fn fixing_fields_clears_the_flags() {
        let mut form = NoticeForm::load().unwrap();
        form.submit().unwrap();
        assert!(form.title.invalid);

        form.dispatch(FormEvent::TitleInput(VALID_TITLE.into())).unwrap();
        form.dispatch(FormEvent::AddressInput("1, 2".into())).unwrap();
        assert!(matches!(form.submit().unwrap(), SubmitOutcome::Accepted(_)));
        assert!(!form.title.invalid);
        assert!(!form.address.invalid);
    }

    #[test]
    fn unknown_option_is_an_error() {
        let mut form = NoticeForm::load().unwrap();
        assert_eq!(
            form.dispatch(FormEvent::TypeChange("castle".into())),
            Err(FormError::UnknownOption {
                field: "type".into(),
                value: "castle".into()
            })
        );
        assert_eq!(form.lodging_type.value(), "flat");
    }

    #[test]
    fn rejected_type_leaves_select_and_floor_alone() {
        let mut form = NoticeForm::load().unwrap();
        form.lodging_type.options.push(SelectOption {
            value: "castle".into(),
            label: "Замок".into(),
            disabled: false,
        });

        assert!(matches!(
            form.dispatch(FormEvent::TypeChange("castle".into())),
            Err(FormError::UnknownType(_))
        ));
        assert_eq!(form.lodging_type.value(), "flat");
        assert_eq!(form.price.min, 1000);
    }

    #[test]
    fn time_change_missing_on_one_side_moves_neither() {
        let mut form = NoticeForm::load().unwrap();
        form.timeout.options.retain(|option| option.value != "14:00");

        for event in [
            FormEvent::TimeInChange("14:00".into()),
            FormEvent::TimeOutChange("14:00".into()),
        ] {
            assert_eq!(
                form.dispatch(event),
                Err(FormError::UnknownOption {
                    field: "timeout".into(),
                    value: "14:00".into()
                })
            );
            assert_eq!(form.timein.value(), "12:00");
            assert_eq!(form.timeout.value(), "12:00");
        }
    }

    #[test]
    fn rooms_without_capacity_rule_are_rejected_before_selecting() {
        let mut form = NoticeForm::load().unwrap();
        form.room_number.options.push(SelectOption {
            value: "4".into(),
            label: "4 комнаты".into(),
            disabled: false,
        });

        assert_eq!(
            form.dispatch(FormEvent::RoomsChange("4".into())),
            Err(FormError::UnknownOption {
                field: "room_number".into(),
                value: "4".into()
            })
        );
        assert_eq!(form.room_number.value(), "1");
        assert_eq!(form.capacity.value(), "1");
    }
}
