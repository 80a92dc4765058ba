use crate::field::FieldDescriptor;

/// Ordered, in-memory store of field descriptors.
///
/// Descriptor order is the display and evaluation order. Positions are
/// 1-based display indices recomputed after removal; the stored names keep
/// their identity when positions shift.
///
/// # Examples
/// ```
/// use fieldlens_core::FieldConfig;
///
/// let mut config = FieldConfig::default();
/// assert_eq!(config.len(), 1);
/// assert_eq!(config.descriptors()[0].name, "Field 1");
///
/// config.append_default();
/// assert_eq!(config.descriptors()[1].name, "Field 2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldConfig {
    fields: Vec<FieldDescriptor>,
}

impl Default for FieldConfig {
    /// A single default descriptor `{"Field 1", "0-3", little}`: the state
    /// a fresh session starts from, and the fallback for callers recovering
    /// from a failed load with no prior state.
    fn default() -> Self {
        Self {
            fields: vec![FieldDescriptor::numbered(1)],
        }
    }
}

impl FieldConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace-the-store constructor used by deserialization: any descriptor
    /// with an empty name is materialized as `"Field N"` for its position.
    pub fn from_descriptors(fields: Vec<FieldDescriptor>) -> Self {
        let fields = fields
            .into_iter()
            .enumerate()
            .map(|(offset, descriptor)| fill_name(descriptor, offset + 1))
            .collect();
        Self { fields }
    }

    /// Append a descriptor at the end of the sequence.
    pub fn append(&mut self, descriptor: FieldDescriptor) {
        self.fields.push(descriptor);
    }

    /// Append a fresh default field named after its new position; returns
    /// that 1-based position.
    pub fn append_default(&mut self) -> usize {
        let position = self.fields.len() + 1;
        self.fields.push(FieldDescriptor::numbered(position));
        position
    }

    /// Remove the field at 1-based `position` and return it, or `None` when
    /// the position is out of range. Subsequent display positions renumber.
    pub fn remove_at(&mut self, position: usize) -> Option<FieldDescriptor> {
        if position == 0 || position > self.fields.len() {
            return None;
        }
        Some(self.fields.remove(position - 1))
    }

    /// Descriptors in display order.
    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn fill_name(mut descriptor: FieldDescriptor, position: usize) -> FieldDescriptor {
    if descriptor.name.is_empty() {
        descriptor.name = format!("Field {position}");
    }
    descriptor
}
