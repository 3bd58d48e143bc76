//! Status helper enums mapping to SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding `*_statuses` database table, and its name matches
//! the table's `name` column.

use crate::error::CoreError;

/// Status ID type matching SMALLINT in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Every variant in seed order.
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Return the `name` column value.
            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }

            /// Look a status up by its database ID.
            pub fn from_id(id: StatusId) -> Result<Self, CoreError> {
                match id {
                    $( $val => Ok($name::$variant), )+
                    other => Err(CoreError::Internal(format!(
                        "Unknown {} id {other}",
                        stringify!($name)
                    ))),
                }
            }

            /// Look a status up by its `name` column value.
            pub fn from_name(name: &str) -> Result<Self, CoreError> {
                match name {
                    $( $label => Ok($name::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        "Unknown status '{other}'"
                    ))),
                }
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

define_status_enum! {
    /// Design request workflow status (`design_request_statuses`).
    RequestStatus {
        PendingReview = 1 => "pending_review",
        QuotationSent = 2 => "quotation_sent",
        NegotiationRequested = 3 => "negotiation_requested",
        RevisedQuotationSent = 4 => "revised_quotation_sent",
        PaymentPending = 5 => "payment_pending",
        Paid = 6 => "paid",
        InProgress = 7 => "in_progress",
        Completed = 8 => "completed",
        Rejected = 9 => "rejected",
    }
}

define_status_enum! {
    /// External payment status (`payment_statuses`).
    PaymentStatus {
        Initiated = 1 => "initiated",
        Succeeded = 2 => "succeeded",
        Failed = 3 => "failed",
    }
}

impl RequestStatus {
    /// Statuses in which a staff quote is outstanding and the customer may respond.
    pub const AWAITING_CUSTOMER: &'static [RequestStatus] =
        &[RequestStatus::QuotationSent, RequestStatus::RevisedQuotationSent];

    /// Terminal statuses: nothing moves a request out of these.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_status_ids_match_seed_data() {
        assert_eq!(RequestStatus::PendingReview.id(), 1);
        assert_eq!(RequestStatus::QuotationSent.id(), 2);
        assert_eq!(RequestStatus::NegotiationRequested.id(), 3);
        assert_eq!(RequestStatus::RevisedQuotationSent.id(), 4);
        assert_eq!(RequestStatus::PaymentPending.id(), 5);
        assert_eq!(RequestStatus::Paid.id(), 6);
        assert_eq!(RequestStatus::InProgress.id(), 7);
        assert_eq!(RequestStatus::Completed.id(), 8);
        assert_eq!(RequestStatus::Rejected.id(), 9);
    }

    #[test]
    fn payment_status_ids_match_seed_data() {
        assert_eq!(PaymentStatus::Initiated.id(), 1);
        assert_eq!(PaymentStatus::Succeeded.id(), 2);
        assert_eq!(PaymentStatus::Failed.id(), 3);
    }

    #[test]
    fn status_into_status_id() {
        let id: StatusId = RequestStatus::Paid.into();
        assert_eq!(id, 6);
    }

    #[test]
    fn from_id_and_name_agree() {
        for status in RequestStatus::ALL {
            assert_eq!(RequestStatus::from_id(status.id()).unwrap(), *status);
            assert_eq!(RequestStatus::from_name(status.name()).unwrap(), *status);
        }
    }

    #[test]
    fn unknown_id_is_internal_error() {
        assert!(matches!(
            RequestStatus::from_id(42),
            Err(CoreError::Internal(_))
        ));
    }

    #[test]
    fn unknown_name_is_validation_error() {
        assert!(matches!(
            PaymentStatus::from_name("refunded"),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn only_completed_and_rejected_are_terminal() {
        let terminal: Vec<_> = RequestStatus::ALL
            .iter()
            .filter(|s| s.is_terminal())
            .collect();
        assert_eq!(
            terminal,
            vec![&RequestStatus::Completed, &RequestStatus::Rejected]
        );
    }
}
