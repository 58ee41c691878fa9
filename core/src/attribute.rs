//! Element attributes and their merge rules.


/// A single `name="value"` pair.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Attribute {
    /// Attribute name, as written
    pub name: String,
    /// Attribute value, possibly empty
    pub value: String,
}

impl Attribute {
    /// Make a new one from anything string-like.
    pub fn new<N, V>(name: N, value: V) -> Self
        where N: Into<String>,
              V: Into<String>,
    {
        Self { name: name.into(), value: value.into() }
    }
}


/// Ordered attribute list where inserting an existing name overwrites its
/// value in place, except for `class` whose values accumulate space-joined.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Attributes(Vec<Attribute>);

impl Attributes {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert with the merge rule.  A `class` value is not appended to an
    /// existing value that is exactly `placeholder`; it replaces it instead,
    /// so seeded caret placeholders do not leak into literal classes.
    pub fn merge(&mut self, attr: Attribute, placeholder: &str) {
        match self.0.iter_mut().find(|a| a.name == attr.name) {
            Some(existing) if attr.name == "class" => {
                if existing.value.is_empty() || existing.value == placeholder {
                    existing.value = attr.value;
                } else if !attr.value.is_empty() {
                    existing.value.push(' ');
                    existing.value.push_str(&attr.value);
                }
            }
            Some(existing) => existing.value = attr.value,
            None => self.0.push(attr),
        }
    }

    /// Insert only if the name is not present yet.
    pub fn seed(&mut self, attr: Attribute) {
        if self.get(&attr.name).is_none() {
            self.0.push(attr);
        }
    }

    /// The value of the attribute named `name`, compared case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.iter()
              .find(|a| a.name.eq_ignore_ascii_case(name))
              .map(|a| a.value.as_str())
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.0.iter()
    }

    /// Iterate mutably in insertion order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Attribute> {
        self.0.iter_mut()
    }

    /// How many.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// None at all?
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(attrs: &Attributes) -> Vec<(&str, &str)> {
        attrs.iter().map(|a| (a.name.as_str(), a.value.as_str())).collect()
    }

    #[test]
    fn merge() {
        let mut attrs = Attributes::new();
        attrs.merge(Attribute::new("name", ""), "|");
        attrs.merge(Attribute::new("id", ""), "|");
        attrs.merge(Attribute::new("class", "a"), "|");
        attrs.merge(Attribute::new("id", "test"), "|");
        attrs.merge(Attribute::new("class", "b"), "|");
        assert_eq!(pairs(&attrs), [("name", ""), ("id", "test"), ("class", "a b")]);
        assert_eq!(attrs.get("ID"), Some("test"));
    }

    #[test]
    fn placeholders() {
        let mut attrs = Attributes::new();
        attrs.seed(Attribute::new("class", "|"));
        attrs.seed(Attribute::new("class", "other"));
        assert_eq!(pairs(&attrs), [("class", "|")]);
        attrs.merge(Attribute::new("class", "x"), "|");
        assert_eq!(pairs(&attrs), [("class", "x")]);
    }
}
