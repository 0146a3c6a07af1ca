/// Command ids ordered most-recent-first. Lives for the process only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecencyList {
    ids: Vec<String>,
}

#[allow(dead_code)]
impl RecencyList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touch(&mut self, id: &str) {
        if let Some(pos) = self.index_of(id) {
            self.ids.remove(pos);
        }
        self.ids.insert(0, id.to_string());
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|i| i == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
