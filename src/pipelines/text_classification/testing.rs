use std::cell::RefCell;

use super::{ClassId, Classify};

/// Flags texts that mention a CPF and records every text it sees
#[derive(Default)]
pub(crate) struct KeywordClassifier {
    pub(crate) seen: RefCell<Vec<String>>,
}

impl Classify for KeywordClassifier {
    fn classify(&self, text: &str) -> anyhow::Result<ClassId> {
        self.seen.borrow_mut().push(text.to_string());

        if text.contains("CPF") {
            Ok(ClassId::NonPublic)
        } else {
            Ok(ClassId::Public)
        }
    }
}

/// Fails on the n-th text
pub(crate) struct FailingClassifier {
    pub(crate) fail_at: usize,
    pub(crate) calls: RefCell<usize>,
}

impl Classify for FailingClassifier {
    fn classify(&self, _text: &str) -> anyhow::Result<ClassId> {
        let mut calls = self.calls.borrow_mut();
        *calls += 1;

        if *calls == self.fail_at {
            Err(anyhow!("inference failed"))
        } else {
            Ok(ClassId::Public)
        }
    }
}
