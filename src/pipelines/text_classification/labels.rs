use std::fmt::Display;

/// The two classes the model predicts
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ClassId {
    /// Public, the text holds no personal data
    Public,

    /// Not public, the text contains personal data
    NonPublic,
}

impl ClassId {
    /// Every class, in id order
    pub const ALL: [ClassId; 2] = [ClassId::Public, ClassId::NonPublic];

    /// The integer id the model uses for this class
    pub fn id(&self) -> usize {
        match self {
            ClassId::Public => 0,
            ClassId::NonPublic => 1,
        }
    }

    /// Short status written to the `status` column of a classified table
    pub fn status(&self) -> &'static str {
        match self {
            ClassId::Public => "Público",
            ClassId::NonPublic => "Não Público",
        }
    }

    /// Full status written to a single-file report
    pub fn description(&self) -> &'static str {
        match self {
            ClassId::Public => "Público (Sem dados pessoais)",
            ClassId::NonPublic => "Não Público (Contém dados pessoais)",
        }
    }
}

impl TryFrom<usize> for ClassId {
    type Error = LabelError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        ClassId::ALL
            .into_iter()
            .find(|class| class.id() == value)
            .ok_or(LabelError::OutOfRange(value))
    }
}

impl Display for ClassId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Label Error
#[derive(thiserror::Error, Debug)]
pub enum LabelError {
    /// The class id is outside of the label space
    #[error("class id {0} is outside of the label space")]
    OutOfRange(usize),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn ids_map_to_fixed_labels() -> Result<(), LabelError> {
        assert_eq!(ClassId::try_from(0)?, ClassId::Public);
        assert_eq!(ClassId::try_from(1)?, ClassId::NonPublic);

        assert_eq!(ClassId::Public.description(), "Público (Sem dados pessoais)");
        assert_eq!(ClassId::NonPublic.description(), "Não Público (Contém dados pessoais)");
        assert_eq!(ClassId::Public.status(), "Público");
        assert_eq!(ClassId::NonPublic.status(), "Não Público");
        Ok(())
    }

    #[test]
    fn no_third_label() {
        assert!(matches!(ClassId::try_from(2), Err(LabelError::OutOfRange(2))));

        let statuses: Vec<_> = ClassId::ALL.iter().map(ClassId::status).collect();
        assert_eq!(statuses, vec!["Público", "Não Público"]);
    }

    #[test]
    fn ids_round_trip() -> Result<(), LabelError> {
        for class in ClassId::ALL {
            assert_eq!(ClassId::try_from(class.id())?, class);
        }
        Ok(())
    }
}
