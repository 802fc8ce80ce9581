use crate::Property;

/// Dialog open over a listing page, with the request it has in flight.
///
/// Save and delete requests are started by moving into the in-flight state,
/// which only succeeds once per confirmation. Closing is ignored while a
/// request runs; the request's outcome decides what happens next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DetailDialog {
    #[default]
    Closed,
    Edit {
        saving: bool,
    },
    ConfirmDelete {
        deleting: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailEvent {
    OpenEdit,
    OpenDelete,
    Close,
    SaveRequested,
    Saved,
    SaveFailed,
    DeleteRequested,
    DeleteFailed,
}

impl DetailDialog {
    pub fn apply(self, event: DetailEvent) -> Self {
        use DetailDialog::*;
        use DetailEvent::*;

        match (self, event) {
            (Closed, OpenEdit) => Edit { saving: false },
            (Closed, OpenDelete) => ConfirmDelete { deleting: false },
            (Edit { saving: false }, Close)
            | (ConfirmDelete { deleting: false }, Close) => Closed,
            (Edit { saving: false }, SaveRequested) => Edit { saving: true },
            (Edit { saving: true }, Saved) => Closed,
            (Edit { saving: true }, SaveFailed) => Edit { saving: false },
            (ConfirmDelete { deleting: false }, DeleteRequested) => {
                ConfirmDelete { deleting: true }
            }
            (ConfirmDelete { deleting: true }, DeleteFailed) => {
                ConfirmDelete { deleting: false }
            }
            (unchanged, _) => unchanged,
        }
    }

    pub fn is_saving(&self) -> bool {
        matches!(self, Self::Edit { saving: true })
    }

    pub fn is_deleting(&self) -> bool {
        matches!(self, Self::ConfirmDelete { deleting: true })
    }

    /// Edit and Delete are offered to the owner of the listing only.
    pub fn controls_visible(property: &Property, viewer: Option<&str>) -> bool {
        property.is_owned_by(viewer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::property_with_images;

    fn replay(events: &[DetailEvent]) -> DetailDialog {
        events
            .iter()
            .fold(DetailDialog::default(), |dialog, event| dialog.apply(*event))
    }

    #[test]
    fn repeated_delete_confirmations_start_one_request() {
        let mut dialog = replay(&[DetailEvent::OpenDelete]);
        let mut started = 0;
        for _ in 0..3 {
            let next = dialog.apply(DetailEvent::DeleteRequested);
            if next.is_deleting() && !dialog.is_deleting() {
                started += 1;
            }
            dialog = next;
        }
        assert_eq!(started, 1);
        assert_eq!(dialog, DetailDialog::ConfirmDelete { deleting: true });
    }

    #[test]
    fn failed_delete_can_be_retried_and_cannot_be_closed_midway() {
        let deleting =
            replay(&[DetailEvent::OpenDelete, DetailEvent::DeleteRequested]);
        assert_eq!(deleting.apply(DetailEvent::Close), deleting);

        let failed = deleting.apply(DetailEvent::DeleteFailed);
        assert!(!failed.is_deleting());
        assert!(failed.apply(DetailEvent::DeleteRequested).is_deleting());
        assert_eq!(failed.apply(DetailEvent::Close), DetailDialog::Closed);
    }

    #[test]
    fn delete_needs_an_open_confirmation() {
        assert_eq!(
            replay(&[DetailEvent::DeleteRequested]),
            DetailDialog::Closed
        );
        assert_eq!(
            replay(&[DetailEvent::OpenEdit, DetailEvent::DeleteRequested]),
            DetailDialog::Edit { saving: false }
        );
    }

    #[test]
    fn save_closes_the_editor_only_on_success() {
        let saving = replay(&[DetailEvent::OpenEdit, DetailEvent::SaveRequested]);
        assert!(saving.is_saving());
        assert_eq!(saving.apply(DetailEvent::SaveRequested), saving);
        assert_eq!(saving.apply(DetailEvent::Close), saving);
        assert_eq!(
            saving.apply(DetailEvent::SaveFailed),
            DetailDialog::Edit { saving: false }
        );
        assert_eq!(saving.apply(DetailEvent::Saved), DetailDialog::Closed);
    }

    #[test]
    fn one_dialog_at_a_time() {
        assert_eq!(
            replay(&[DetailEvent::OpenEdit, DetailEvent::OpenDelete]),
            DetailDialog::Edit { saving: false }
        );
    }

    #[test]
    fn controls_are_hidden_from_guests_and_other_users() {
        let property = property_with_images(&[]);
        assert!(DetailDialog::controls_visible(&property, Some("alice")));
        assert!(!DetailDialog::controls_visible(&property, Some("bob")));
        assert!(!DetailDialog::controls_visible(&property, None));
    }
}
