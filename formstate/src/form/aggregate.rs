//! Form-wide status aggregation.

use crate::field::StatusFlags;

use super::FormValidationState;

impl FormValidationState {
    /// Fold every field's flags into the form status.
    ///
    /// `untouched` ends up set only if every field is untouched and `touched`
    /// only if every field is touched. With no fields both are set.
    pub fn derive_aggregate_status(&mut self) {
        let mut status = StatusFlags::AGGREGATE_BASELINE;

        for field in self.order.iter().filter_map(|name| self.fields.get(name)) {
            let f = &field.status;
            if !f.untouched {
                status.untouched = false;
            }
            if f.untouched {
                status.touched = false;
            }
            if f.modified {
                status.modified = true;
            }
            if f.dirty {
                status.dirty = true;
            }
            if !f.pristine {
                status.pristine = false;
            }
            if f.invalid {
                status.invalid = true;
            }
            if !f.valid {
                status.valid = false;
            }
        }

        self.status = status;
    }
}
