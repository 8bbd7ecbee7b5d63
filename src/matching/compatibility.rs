use crate::core::types::BloodGroup;

use BloodGroup::{ANeg, APos, AbNeg, AbPos, BNeg, BPos, ONeg, OPos};

/// Recipient group -> donor groups that may supply it.
///
/// Keyed by recipient, not donor. AB+ accepts every group and O- is the only
/// group every recipient accepts.
const COMPATIBILITY_TABLE: [(BloodGroup, &[BloodGroup]); 8] = [
    (APos, &[APos, ANeg, OPos, ONeg]),
    (ANeg, &[ANeg, ONeg]),
    (BPos, &[BPos, BNeg, OPos, ONeg]),
    (BNeg, &[BNeg, ONeg]),
    (AbPos, &[APos, ANeg, BPos, BNeg, AbPos, AbNeg, OPos, ONeg]),
    (AbNeg, &[ANeg, BNeg, AbNeg, ONeg]),
    (OPos, &[OPos, ONeg]),
    (ONeg, &[ONeg]),
];

/// Donor groups acceptable for a recipient group, or an empty slice if the
/// group has no row.
#[must_use]
pub fn acceptable_donors(recipient: BloodGroup) -> &'static [BloodGroup] {
    COMPATIBILITY_TABLE
        .iter()
        .find(|(group, _)| *group == recipient)
        .map_or(&[], |(_, donors)| *donors)
}

/// Whether a donor of group `donor` may donate to a recipient of group `recipient`
#[must_use]
pub fn is_compatible(donor: BloodGroup, recipient: BloodGroup) -> bool {
    acceptable_donors(recipient).contains(&donor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_table() {
        // (recipient, donor) pairs that are allowed; everything else is not
        let allowed: &[(BloodGroup, BloodGroup)] = &[
            (APos, APos),
            (APos, ANeg),
            (APos, OPos),
            (APos, ONeg),
            (ANeg, ANeg),
            (ANeg, ONeg),
            (BPos, BPos),
            (BPos, BNeg),
            (BPos, OPos),
            (BPos, ONeg),
            (BNeg, BNeg),
            (BNeg, ONeg),
            (AbPos, APos),
            (AbPos, ANeg),
            (AbPos, BPos),
            (AbPos, BNeg),
            (AbPos, AbPos),
            (AbPos, AbNeg),
            (AbPos, OPos),
            (AbPos, ONeg),
            (AbNeg, ANeg),
            (AbNeg, BNeg),
            (AbNeg, AbNeg),
            (AbNeg, ONeg),
            (OPos, OPos),
            (OPos, ONeg),
            (ONeg, ONeg),
        ];

        let mut checked = 0;
        for recipient in BloodGroup::ALL {
            for donor in BloodGroup::ALL {
                let expected = allowed.contains(&(recipient, donor));
                assert_eq!(
                    is_compatible(donor, recipient),
                    expected,
                    "donor {donor} -> recipient {recipient}"
                );
                checked += 1;
            }
        }
        assert_eq!(checked, 64);
    }

    #[test]
    fn test_every_group_accepts_itself() {
        for group in BloodGroup::ALL {
            assert!(is_compatible(group, group), "{group} should accept {group}");
        }
    }

    #[test]
    fn test_universal_donor_and_recipient() {
        assert_eq!(acceptable_donors(AbPos).len(), 8);
        for recipient in BloodGroup::ALL {
            assert!(is_compatible(ONeg, recipient));
        }
    }

    #[test]
    fn test_direction_is_recipient_keyed() {
        // AB- may receive from B- but B- may not receive from AB-
        assert!(is_compatible(BNeg, AbNeg));
        assert!(!is_compatible(AbNeg, BNeg));
        assert!(!is_compatible(BPos, AbNeg));
    }
}
