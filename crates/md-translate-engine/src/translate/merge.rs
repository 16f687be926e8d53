use log::{debug, info};

use crate::model::{Block, Document, ListBlock, Translatable};

use super::{TranslationContext, TranslationError, Translator, TranslatorSession};

/// Copies translations from a previously cached tree into a fresh one.
///
/// The trees are aligned by position: nodes of the same kind at the same
/// index are descended pairwise, anything else stops the walk for that
/// subtree. A leaf inherits only when its original text is byte-identical to
/// the cached leaf's. Returns the number of inherited leaves.
pub fn inherit_translations(doc: &mut Document, cached: &Document) -> usize {
    inherit_blocks(&mut doc.children, &cached.children)
}

fn inherit_blocks(fresh: &mut [Block], cached: &[Block]) -> usize {
    fresh
        .iter_mut()
        .zip(cached)
        .map(|(fresh, cached)| inherit_block(fresh, cached))
        .sum()
}

fn inherit_block(fresh: &mut Block, cached: &Block) -> usize {
    match (fresh, cached) {
        (Block::Text(fresh), Block::Text(cached)) => inherit_leaf(&mut fresh.text, &cached.text),
        (Block::Image(fresh), Block::Image(cached)) => inherit_leaf(&mut fresh.alt, &cached.alt),
        (
            Block::Heading {
                level: fresh_level,
                children: fresh,
            },
            Block::Heading {
                level: cached_level,
                children: cached,
            },
        ) if *fresh_level == *cached_level => inherit_blocks(fresh, cached),
        (Block::List(fresh), Block::List(cached)) => inherit_list(fresh, cached),
        (Block::Paragraph { children: fresh }, Block::Paragraph { children: cached })
        | (Block::Quote { children: fresh }, Block::Quote { children: cached })
        | (Block::Strong { children: fresh }, Block::Strong { children: cached })
        | (Block::Emphasis { children: fresh }, Block::Emphasis { children: cached }) => {
            inherit_blocks(fresh, cached)
        }
        (Block::Link(fresh), Block::Link(cached)) => {
            let title = match (&mut fresh.title, &cached.title) {
                (Some(fresh), Some(cached)) => inherit_leaf(fresh, cached),
                _ => 0,
            };
            inherit_blocks(&mut fresh.children, &cached.children) + title
        }
        _ => 0,
    }
}

fn inherit_list(fresh: &mut ListBlock, cached: &ListBlock) -> usize {
    if fresh.ordered != cached.ordered {
        return 0;
    }
    fresh
        .items
        .iter_mut()
        .zip(&cached.items)
        .map(|(fresh, cached)| {
            let nested = match (fresh.nested.as_deref_mut(), cached.nested.as_deref()) {
                (Some(fresh), Some(cached)) => inherit_list(fresh, cached),
                _ => 0,
            };
            inherit_blocks(&mut fresh.children, &cached.children) + nested
        })
        .sum()
}

fn inherit_leaf(fresh: &mut Translatable, cached: &Translatable) -> usize {
    match cached.translated() {
        Some(translated) if !fresh.is_translated() && fresh.original() == cached.original() => {
            fresh.force_translation(translated);
            1
        }
        _ => 0,
    }
}

/// Translates every leaf that still needs it, depth-first in document order.
///
/// Stops at the first failure; translations stored before it stay in `doc`.
/// Returns the number of capability calls made.
pub fn translate_document<T: Translator>(
    doc: &mut Document,
    session: &mut TranslatorSession<'_, T>,
    ctx: &TranslationContext,
) -> Result<usize, TranslationError> {
    info!(
        "{}: {} of {} text runs need translation",
        ctx.label,
        doc.pending_count(),
        doc.translatable_count()
    );

    let mut calls = 0;
    doc.try_for_each_translatable_mut(&mut |leaf| -> Result<(), TranslationError> {
        if !leaf.needs_translation() {
            return Ok(());
        }
        let translated = session.translate(leaf.original(), &ctx.from_language, &ctx.to_language)?;
        calls += 1;
        debug!("{}: {:?} -> {:?}", ctx.label, leaf.original(), translated);
        leaf.set_translation(translated)?;
        Ok(())
    })?;
    Ok(calls)
}
