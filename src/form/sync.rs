use crate::form::{FormError, NoticeForm};
use crate::models::LodgingType;
use tracing::debug;

pub const TITLE_TOO_SHORT: &str = "Пожалуйста, используйте не менее 30 символов";

/// Guest capacities a room count can host
pub fn allowed_capacities(rooms: &str) -> Option<&'static [&'static str]> {
    match rooms {
        "1" => Some(&["1"]),
        "2" => Some(&["1", "2"]),
        "3" => Some(&["1", "2", "3"]),
        "100" => Some(&["0"]),
        _ => None,
    }
}

impl NoticeForm {
    /// Raise the price floor to the selected type's minimum.
    ///
    /// The typed price is left alone; a value under the new floor only
    /// shows up as invalid.
    pub fn sync_type_with_price(&mut self) -> Result<(), FormError> {
        let kind: LodgingType = self.lodging_type.value().parse()?;
        self.price.min = kind.min_price();
        debug!("Price floor for {} is now {}", kind, self.price.min);
        Ok(())
    }

    /// Disable capacities the room count cannot host and select the first
    /// one left enabled
    pub fn sync_rooms_with_capacity(&mut self) -> Result<(), FormError> {
        let rooms = self.room_number.value();
        let allowed = allowed_capacities(rooms).ok_or_else(|| FormError::UnknownOption {
            field: self.room_number.name.clone(),
            value: rooms.to_string(),
        })?;

        for option in &mut self.capacity.options {
            option.disabled = !allowed.contains(&option.value.as_str());
        }
        if let Some(first) = self.capacity.options.iter().position(|o| !o.disabled) {
            self.capacity.selected = first;
        }
        Ok(())
    }

    /// Live length check on the title
    pub fn validate_title(&mut self) {
        self.title.custom_validity = if self.title.too_short() {
            TITLE_TOO_SHORT.to_string()
        } else {
            String::new()
        };
    }

    /// Toggle the invalid flag on every field; returns the names of the
    /// invalid ones in form order
    pub fn flag_invalid(&mut self) -> Vec<String> {
        self.validate_title();

        let mut invalid = Vec::new();
        let mut flag = |name: &str, valid: bool, slot: &mut bool| {
            *slot = !valid;
            if !valid {
                invalid.push(name.to_string());
            }
        };

        flag(&self.title.name, self.title.is_valid(), &mut self.title.invalid);
        flag(&self.address.name, self.address.is_valid(), &mut self.address.invalid);
        flag(
            &self.lodging_type.name,
            self.lodging_type.is_valid(),
            &mut self.lodging_type.invalid,
        );
        flag(&self.price.name, self.price.is_valid(), &mut self.price.invalid);
        flag(&self.timein.name, self.timein.is_valid(), &mut self.timein.invalid);
        flag(&self.timeout.name, self.timeout.is_valid(), &mut self.timeout.invalid);
        flag(
            &self.room_number.name,
            self.room_number.is_valid(),
            &mut self.room_number.invalid,
        );
        flag(&self.capacity.name, self.capacity.is_valid(), &mut self.capacity.invalid);

        invalid
    }
}
