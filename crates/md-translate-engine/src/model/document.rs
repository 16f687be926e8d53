use super::{block::Block, translatable::Translatable};

/// Root of a parsed markdown file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub children: Vec<Block>,
}

impl Document {
    pub fn new(children: Vec<Block>) -> Self {
        Self { children }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn for_each_translatable<'a>(&'a self, visit: &mut impl FnMut(&'a Translatable)) {
        for block in &self.children {
            block.for_each_translatable(visit);
        }
    }

    pub fn try_for_each_translatable_mut<E>(
        &mut self,
        visit: &mut impl FnMut(&mut Translatable) -> Result<(), E>,
    ) -> Result<(), E> {
        for block in &mut self.children {
            block.try_for_each_translatable_mut(visit)?;
        }
        Ok(())
    }

    /// Number of translatable leaves, translated or not.
    pub fn translatable_count(&self) -> usize {
        let mut count = 0;
        self.for_each_translatable(&mut |_| count += 1);
        count
    }

    /// Number of leaves that still need a translation.
    pub fn pending_count(&self) -> usize {
        let mut count = 0;
        self.for_each_translatable(&mut |leaf| {
            if leaf.needs_translation() {
                count += 1;
            }
        });
        count
    }
}
