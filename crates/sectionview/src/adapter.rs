//! The heterogeneous adapter.
//!
//! [`HeterogeneousAdapter`] presents an ordered list of [`Section`]s to a host
//! list widget as one flat list. It answers the host's questions ("how many
//! rows", "what type is row i", "what id is row i", "build a view for type T",
//! "bind row i into view V") by mapping flat positions to sections and
//! delegating.
//!
//! # Position mapping
//!
//! Sections are laid out back to back in display order. A flat position is
//! resolved by a linear scan that accumulates each section's effective count
//! (zero while hidden). Section counts are small and hosts query positions in
//! roughly sequential bursts, so no index is kept between lookups.
//!
//! # Type codes
//!
//! Every row's section-local [`Subtype`](crate::Subtype) is folded into a global [`TypeCode`].
//! The adapter remembers which section produced each code the first time it
//! sees it, and uses that to route [`create_view`](HeterogeneousAdapter::create_view)
//! calls. Entries are purged when their section is removed; otherwise the map
//! only grows unless [`AdapterConfig::prune_type_codes_on_refresh`] is set or
//! [`reset_type_codes`](HeterogeneousAdapter::reset_type_codes) is called.
//!
//! # Example
//!
//! ```
//! use sectionview::{FnRenderer, HeterogeneousAdapter, ListSection, SingletonSection};
//!
//! fn label() -> FnRenderer<String, String> {
//!     FnRenderer::new(
//!         |_| String::new(),
//!         |view: &mut String, item: &String, _| view.clone_from(item),
//!     )
//! }
//!
//! let mut adapter = HeterogeneousAdapter::<String>::new();
//! adapter.add_section(SingletonSection::new("Header".to_string(), label()))?;
//! adapter.add_section(ListSection::new(vec!["a".to_string(), "b".to_string()], label()))?;
//!
//! assert_eq!(adapter.flat_count(), 3);
//!
//! let code = adapter.item_type(2)?;
//! let mut holder = adapter.create_view(code)?;
//! adapter.bind_view(&mut holder, 2)?;
//! assert_eq!(holder.view(), "b");
//! # Ok::<(), sectionview::AdapterError>(())
//! ```

use std::collections::HashMap;
use std::fmt;

use parking_lot::Mutex;

use crate::config::AdapterConfig;
use crate::coordinate::Coordinate;
use crate::empty_state::EmptyState;
use crate::error::{AdapterError, Result};
use crate::item_id::ItemId;
use crate::section::{AnySection, Section, SectionHandle};
use crate::signals::AdapterSignals;
use crate::type_code::{SectionId, TypeCode};
use crate::view::ViewHolder;

/// A section together with the id it was attached under.
struct AttachedSection<V> {
    id: SectionId,
    section: Box<dyn AnySection<V>>,
}

/// Presents an ordered list of sections as a single flat list.
///
/// `V` is the host's view type. All operations are synchronous and expected
/// to run on one thread (the host's UI thread); the adapter performs no change
/// detection, so any mutation of a section's data must be followed by a
/// refresh (see [`notify_data_set_changed`](Self::notify_data_set_changed) and
/// [`edit`](Self::edit)).
pub struct HeterogeneousAdapter<V: 'static> {
    /// Attached sections in display order.
    sections: Vec<AttachedSection<V>>,
    /// Every type code observed since the last reset, and the section that
    /// produced it. Locked only for interior mutability from `&self` queries.
    type_codes: Mutex<HashMap<TypeCode, SectionId>>,
    /// Shown when no section has any rows.
    empty_state: Option<Box<dyn EmptyState<V>>>,
    config: AdapterConfig,
    /// The id handed to the most recently attached section.
    last_section_id: Option<SectionId>,
    signals: AdapterSignals,
}

impl<V: 'static> Default for HeterogeneousAdapter<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: 'static> HeterogeneousAdapter<V> {
    /// Creates an adapter with no sections that does not share item types.
    pub fn new() -> Self {
        Self::with_config(AdapterConfig::default())
    }

    /// Creates an adapter with no sections that shares item types across
    /// sections.
    pub fn shared() -> Self {
        Self::with_config(AdapterConfig::shared())
    }

    /// Creates an adapter with no sections and the given settings.
    pub fn with_config(config: AdapterConfig) -> Self {
        Self {
            sections: Vec::new(),
            type_codes: Mutex::new(HashMap::new()),
            empty_state: None,
            config,
            last_section_id: None,
            signals: AdapterSignals::new(),
        }
    }

    /// Starts building an adapter.
    pub fn builder() -> AdapterBuilder<V> {
        AdapterBuilder::new()
    }

    /// Returns the adapter's settings.
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Returns `true` if sections share item types. Fixed at construction.
    pub fn is_share_item_type(&self) -> bool {
        self.config.share_item_type
    }

    /// Returns the signals the host listens to for refreshes.
    pub fn signals(&self) -> &AdapterSignals {
        &self.signals
    }

    // -------------------------------------------------------------------------
    // Sections
    // -------------------------------------------------------------------------

    /// Returns the number of attached sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Attaches a section after all existing sections.
    pub fn add_section<S>(&mut self, section: S) -> Result<SectionHandle<S>>
    where
        S: Section<V> + 'static,
    {
        self.insert_section(self.sections.len(), section)
    }

    /// Attaches a section at `index` in display order, shifting later sections
    /// down.
    ///
    /// The section receives a fresh id and the host is told to refresh
    /// everything.
    pub fn insert_section<S>(&mut self, index: usize, section: S) -> Result<SectionHandle<S>>
    where
        S: Section<V> + 'static,
    {
        if index > self.sections.len() {
            return Err(AdapterError::SectionIndexOutOfRange {
                index,
                len: self.sections.len(),
            });
        }

        let id = self.next_section_id()?;
        let section: Box<dyn AnySection<V>> = Box::new(section);
        tracing::debug!(
            target: "sectionview::adapter",
            section_id = id.get(),
            index,
            section_type = section.type_name(),
            "attaching section"
        );
        self.sections.insert(index, AttachedSection { id, section });
        self.notify_data_set_changed();
        Ok(SectionHandle::new(id))
    }

    /// Detaches the section at `index` and returns it.
    ///
    /// Type codes produced by the section are forgotten and the host is told
    /// to refresh everything. The section's id is never handed out again.
    pub fn remove_section(&mut self, index: usize) -> Result<Box<dyn AnySection<V>>> {
        if index >= self.sections.len() {
            return Err(AdapterError::SectionIndexOutOfRange {
                index,
                len: self.sections.len(),
            });
        }
        Ok(self.detach(index).section)
    }

    /// Detaches the section behind `handle` and returns it by value.
    ///
    /// Returns `None` if the section was already removed.
    pub fn take_section<S>(&mut self, handle: &SectionHandle<S>) -> Option<S>
    where
        S: Section<V> + 'static,
    {
        let index = self.section_index_of(handle.id())?;
        let attached = self.detach(index);
        attached.section.into_any().downcast::<S>().ok().map(|section| *section)
    }

    fn detach(&mut self, index: usize) -> AttachedSection<V> {
        let removed = self.sections.remove(index);
        let purged = self.purge_type_codes(removed.id);
        tracing::debug!(
            target: "sectionview::adapter",
            section_id = removed.id.get(),
            index,
            purged_type_codes = purged,
            "detached section"
        );
        self.notify_data_set_changed();
        removed
    }

    fn next_section_id(&mut self) -> Result<SectionId> {
        let id = match self.last_section_id {
            None => SectionId::FIRST,
            Some(last) => last.next().ok_or(AdapterError::SectionIdsExhausted)?,
        };
        self.last_section_id = Some(id);
        Ok(id)
    }

    /// Removes every type code owned by `id`, returning how many were removed.
    fn purge_type_codes(&mut self, id: SectionId) -> usize {
        let type_codes = self.type_codes.get_mut();
        let before = type_codes.len();
        type_codes.retain(|_, owner| *owner != id);
        before - type_codes.len()
    }

    /// Returns the section at `index`.
    pub fn section(&self, index: usize) -> Option<&dyn AnySection<V>> {
        self.sections.get(index).map(|attached| attached.section.as_ref())
    }

    /// Returns the section at `index` if it is an `S`.
    pub fn section_as<S: 'static>(&self, index: usize) -> Option<&S> {
        self.section(index)?.as_any().downcast_ref::<S>()
    }

    /// Returns the section at `index` mutably if it is an `S`.
    ///
    /// Refresh the adapter after mutating the section's data.
    pub fn section_as_mut<S: 'static>(&mut self, index: usize) -> Option<&mut S> {
        self.sections
            .get_mut(index)?
            .section
            .as_any_mut()
            .downcast_mut::<S>()
    }

    /// Returns the id of the section at `index`.
    pub fn section_id(&self, index: usize) -> Option<SectionId> {
        self.sections.get(index).map(|attached| attached.id)
    }

    /// Returns the section behind `handle`, or `None` once it has been removed.
    pub fn get<S: 'static>(&self, handle: &SectionHandle<S>) -> Option<&S> {
        let index = self.section_index_of(handle.id())?;
        self.section_as(index)
    }

    /// Returns the section behind `handle` mutably, or `None` once it has been
    /// removed.
    ///
    /// Refresh the adapter after mutating the section's data.
    pub fn get_mut<S: 'static>(&mut self, handle: &SectionHandle<S>) -> Option<&mut S> {
        let index = self.section_index_of(handle.id())?;
        self.section_as_mut(index)
    }

    /// Mutates the section behind `handle` and tells the host to refresh
    /// everything.
    ///
    /// Returns `None`, without refreshing, if the section has been removed.
    pub fn edit<S, F, R>(&mut self, handle: &SectionHandle<S>, f: F) -> Option<R>
    where
        S: 'static,
        F: FnOnce(&mut S) -> R,
    {
        let result = f(self.get_mut(handle)?);
        self.notify_data_set_changed();
        Some(result)
    }

    /// Returns the display index of the section behind `handle`.
    pub fn section_index<S>(&self, handle: &SectionHandle<S>) -> Option<usize> {
        self.section_index_of(handle.id())
    }

    /// Returns the display index of the section with the given id.
    pub fn section_index_of(&self, id: SectionId) -> Option<usize> {
        self.sections.iter().position(|attached| attached.id == id)
    }

    // -------------------------------------------------------------------------
    // Empty state
    // -------------------------------------------------------------------------

    /// Installs the placeholder shown when no section has any rows.
    pub fn set_empty_state<E>(&mut self, empty_state: E)
    where
        E: EmptyState<V> + 'static,
    {
        self.empty_state = Some(Box::new(empty_state));
    }

    /// Removes the placeholder; an empty adapter then has no rows at all.
    pub fn clear_empty_state(&mut self) {
        self.empty_state = None;
    }

    /// Returns `true` if an empty state is installed.
    pub fn has_empty_state(&self) -> bool {
        self.empty_state.is_some()
    }

    /// Returns `true` if the only row is the empty-state placeholder.
    pub fn is_showing_empty_state(&self) -> bool {
        self.empty_state.is_some() && self.aggregate_count() == 0
    }

    // -------------------------------------------------------------------------
    // Position mapping
    // -------------------------------------------------------------------------

    /// Returns the number of visible rows across all sections.
    ///
    /// Unlike [`flat_count`](Self::flat_count), this never counts the
    /// empty-state placeholder.
    pub fn aggregate_count(&self) -> usize {
        self.sections.iter().map(|attached| attached.section.size()).sum()
    }

    /// Returns the number of rows the host should show.
    ///
    /// Equal to [`aggregate_count`](Self::aggregate_count), except that an
    /// empty adapter with an empty state installed has exactly one row.
    pub fn flat_count(&self) -> usize {
        match self.aggregate_count() {
            0 if self.empty_state.is_some() => 1,
            count => count,
        }
    }

    /// Maps a flat position to the section containing it and the item index
    /// within that section.
    ///
    /// Returns [`Coordinate::unknown()`] if no section contains `position`.
    pub fn lookup_coordinates(&self, position: usize) -> Coordinate {
        let mut coordinate = Coordinate::unknown();
        let mut running_total = 0;
        for (index, attached) in self.sections.iter().enumerate() {
            let section_total = attached.section.size();
            if position < running_total + section_total {
                coordinate.set(index, position - running_total);
                break;
            }
            running_total += section_total;
        }
        tracing::trace!(
            target: "sectionview::adapter",
            position,
            coordinate = ?coordinate.get(),
            "looked up coordinates"
        );
        coordinate
    }

    /// Returns the number of rows in the sections displayed before the section
    /// at `section_index`.
    ///
    /// Returns `None` if there is no such section.
    pub fn leading_count(&self, section_index: usize) -> Option<usize> {
        if section_index >= self.sections.len() {
            return None;
        }
        Some(
            self.sections[..section_index]
                .iter()
                .map(|attached| attached.section.size())
                .sum(),
        )
    }

    /// Returns the number of rows displayed before the section behind `handle`.
    ///
    /// Returns `None` once the section has been removed.
    pub fn leading_count_of<S>(&self, handle: &SectionHandle<S>) -> Option<usize> {
        self.leading_count(self.section_index(handle)?)
    }

    fn resolve(&self, position: usize) -> Result<(usize, usize)> {
        self.lookup_coordinates(position)
            .get()
            .ok_or_else(|| AdapterError::PositionOutOfRange {
                position,
                count: self.flat_count(),
            })
    }

    fn is_empty_state_row(&self, position: usize) -> Result<bool> {
        if self.empty_state.is_none() || self.aggregate_count() != 0 {
            return Ok(false);
        }
        if position == 0 {
            Ok(true)
        } else {
            Err(AdapterError::PositionOutOfRange { position, count: 1 })
        }
    }

    // -------------------------------------------------------------------------
    // Type codes
    // -------------------------------------------------------------------------

    /// Returns the type code of the row at `position`.
    ///
    /// In non-shared mode, a section reporting a subtype outside `[0, 99]`
    /// (other than [`Subtype::UNDEFINED`](crate::Subtype::UNDEFINED)) is a
    /// contract violation and yields [`AdapterError::InvalidSubtype`].
    pub fn item_type(&self, position: usize) -> Result<TypeCode> {
        if self.is_empty_state_row(position)? {
            return Ok(TypeCode::EMPTY);
        }

        let (section_index, item_index) = self.resolve(position)?;
        let attached = &self.sections[section_index];
        let subtype = attached.section.item_subtype(item_index);

        let type_code = if self.config.share_item_type {
            let type_code = TypeCode::shared(subtype);
            if type_code.is_empty_state() {
                tracing::warn!(
                    target: "sectionview::adapter",
                    position,
                    section_index,
                    "section returned the reserved empty-state type code"
                );
                return Err(AdapterError::ReservedSubtype {
                    position,
                    section_index,
                });
            }
            type_code
        } else {
            if !subtype.is_zippable() {
                tracing::warn!(
                    target: "sectionview::adapter",
                    position,
                    section_index,
                    subtype = subtype.get(),
                    "section returned an item subtype outside the allowed range"
                );
                return Err(AdapterError::InvalidSubtype {
                    position,
                    section_index,
                    subtype,
                });
            }
            TypeCode::zip(attached.id, subtype)
        };

        self.type_codes.lock().insert(type_code, attached.id);
        Ok(type_code)
    }

    /// Returns the display index of the section that produced `type_code`.
    pub fn section_by_type_code(&self, type_code: TypeCode) -> Option<usize> {
        let id = *self.type_codes.lock().get(&type_code)?;
        self.section_index_of(id)
    }

    /// Returns every type code observed since the last reset, in ascending
    /// order.
    pub fn known_type_codes(&self) -> Vec<TypeCode> {
        let mut type_codes: Vec<TypeCode> = self.type_codes.lock().keys().copied().collect();
        type_codes.sort_unstable();
        type_codes
    }

    /// Forgets every observed type code.
    ///
    /// Codes are learned again as the host re-queries item types.
    pub fn reset_type_codes(&self) {
        self.type_codes.lock().clear();
    }

    // -------------------------------------------------------------------------
    // Identity and dispatch
    // -------------------------------------------------------------------------

    /// Returns the stable id of the row at `position`.
    ///
    /// Ids pack the section id with the section's local id, so rows in
    /// different sections never share an id.
    pub fn item_id(&self, position: usize) -> Result<ItemId> {
        if self.is_empty_state_row(position)? {
            return Ok(ItemId::EmptyState);
        }

        let (section_index, item_index) = self.resolve(position)?;
        let attached = &self.sections[section_index];
        Ok(match attached.section.item_local_id(item_index) {
            Some(local) => ItemId::pack(attached.id, local),
            None => ItemId::NoId,
        })
    }

    /// Builds a view for `type_code`, as previously returned by
    /// [`item_type`](Self::item_type).
    ///
    /// Fails with [`AdapterError::UnknownTypeCode`] for codes the adapter has
    /// not emitted (or has forgotten), since there is no section to route to.
    pub fn create_view(&self, type_code: TypeCode) -> Result<ViewHolder<V>> {
        if type_code.is_empty_state() {
            let empty_state = self
                .empty_state
                .as_ref()
                .ok_or(AdapterError::MissingEmptyState)?;
            tracing::trace!(target: "sectionview::adapter", "creating empty-state view");
            return Ok(ViewHolder::new(empty_state.create_view(), type_code));
        }

        let unknown = || AdapterError::UnknownTypeCode(type_code);
        let id = self
            .type_codes
            .lock()
            .get(&type_code)
            .copied()
            .ok_or_else(unknown)?;
        let attached = self
            .sections
            .iter()
            .find(|attached| attached.id == id)
            .ok_or_else(unknown)?;

        let subtype = if self.config.share_item_type {
            type_code.as_shared_subtype()
        } else {
            type_code.unzip(id)
        }
        .ok_or_else(unknown)?;

        tracing::trace!(
            target: "sectionview::adapter",
            type_code = type_code.get(),
            section_id = id.get(),
            %subtype,
            "creating view"
        );
        Ok(ViewHolder::new(attached.section.create_view(subtype), type_code))
    }

    /// Binds the row at `position` into `holder`.
    ///
    /// Empty-state holders are refreshed through the empty state's update
    /// hook; all others are bound by the section owning `position`.
    pub fn bind_view(&self, holder: &mut ViewHolder<V>, position: usize) -> Result<()> {
        if holder.is_empty_state() {
            let empty_state = self
                .empty_state
                .as_ref()
                .ok_or(AdapterError::MissingEmptyState)?;
            empty_state.update(holder.view_mut());
            return Ok(());
        }

        let (section_index, item_index) = self.resolve(position)?;
        tracing::trace!(
            target: "sectionview::adapter",
            position,
            section_index,
            item_index,
            "binding view"
        );
        self.sections[section_index]
            .section
            .bind_at(holder.view_mut(), item_index);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Refresh notifications
    // -------------------------------------------------------------------------

    /// Tells the host that every row must be re-queried.
    ///
    /// Call this after mutating any section's data outside of
    /// [`edit`](Self::edit).
    pub fn notify_data_set_changed(&self) {
        if self.config.prune_type_codes_on_refresh {
            self.reset_type_codes();
        }
        let receivers = self.signals.data_set_changed.emit(());
        tracing::debug!(
            target: "sectionview::adapter",
            receivers,
            "data set changed"
        );
    }

    /// Tells the host that `count` rows starting at the section-local index
    /// `start` changed. Returns the flat start of the range, or `None` if the
    /// section has been removed.
    pub fn notify_section_items_changed<S>(
        &self,
        handle: &SectionHandle<S>,
        start: usize,
        count: usize,
    ) -> Option<usize> {
        let flat_start = self.leading_count_of(handle)? + start;
        self.signals.items_changed.emit((flat_start, count));
        Some(flat_start)
    }

    /// Tells the host that `count` rows were inserted at the section-local
    /// index `start`. Returns the flat start of the range, or `None` if the
    /// section has been removed.
    pub fn notify_section_items_inserted<S>(
        &self,
        handle: &SectionHandle<S>,
        start: usize,
        count: usize,
    ) -> Option<usize> {
        let flat_start = self.leading_count_of(handle)? + start;
        self.signals.items_inserted.emit((flat_start, count));
        Some(flat_start)
    }

    /// Tells the host that `count` rows were removed at the section-local
    /// index `start`. Returns the flat start of the range, or `None` if the
    /// section has been removed.
    pub fn notify_section_items_removed<S>(
        &self,
        handle: &SectionHandle<S>,
        start: usize,
        count: usize,
    ) -> Option<usize> {
        let flat_start = self.leading_count_of(handle)? + start;
        self.signals.items_removed.emit((flat_start, count));
        Some(flat_start)
    }
}

impl<V: 'static> fmt::Debug for HeterogeneousAdapter<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sections: Vec<(SectionId, usize)> = self
            .sections
            .iter()
            .map(|attached| (attached.id, attached.section.size()))
            .collect();
        f.debug_struct("HeterogeneousAdapter")
            .field("sections", &sections)
            .field("type_codes", &self.type_codes.lock().len())
            .field("has_empty_state", &self.empty_state.is_some())
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for [`HeterogeneousAdapter`].
///
/// # Example
///
/// ```
/// use sectionview::{FnEmptyState, HeterogeneousAdapter};
///
/// let adapter = HeterogeneousAdapter::<String>::builder()
///     .share_item_type(true)
///     .empty_state(FnEmptyState::new(|| "No entries".to_string()))
///     .build();
///
/// assert!(adapter.is_share_item_type());
/// assert_eq!(adapter.flat_count(), 1);
/// ```
pub struct AdapterBuilder<V: 'static> {
    config: AdapterConfig,
    empty_state: Option<Box<dyn EmptyState<V>>>,
}

impl<V: 'static> Default for AdapterBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: 'static> AdapterBuilder<V> {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            config: AdapterConfig::default(),
            empty_state: None,
        }
    }

    /// Replaces all settings.
    pub fn config(mut self, config: AdapterConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets whether item types are shared across sections.
    pub fn share_item_type(mut self, share: bool) -> Self {
        self.config.share_item_type = share;
        self
    }

    /// Sets whether type codes are forgotten on a full refresh.
    pub fn prune_type_codes_on_refresh(mut self, prune: bool) -> Self {
        self.config.prune_type_codes_on_refresh = prune;
        self
    }

    /// Installs an empty state.
    pub fn empty_state<E>(mut self, empty_state: E) -> Self
    where
        E: EmptyState<V> + 'static,
    {
        self.empty_state = Some(Box::new(empty_state));
        self
    }

    /// Builds the adapter.
    pub fn build(self) -> HeterogeneousAdapter<V> {
        let mut adapter = HeterogeneousAdapter::with_config(self.config);
        adapter.empty_state = self.empty_state;
        adapter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::empty_state::FnEmptyState;
    use crate::section::{FnRenderer, ListSection, SingletonSection};
    use crate::type_code::Subtype;
    use std::sync::Arc;

    fn label() -> FnRenderer<String, String> {
        FnRenderer::new(
            |_| String::new(),
            |view: &mut String, item: &String, _| view.clone_from(item),
        )
    }

    fn header(title: &str) -> SingletonSection<String, String> {
        SingletonSection::new(title.to_string(), label())
    }

    fn entries(items: &[&str]) -> ListSection<String, String> {
        ListSection::new(items.iter().map(|s| s.to_string()).collect(), label())
    }

    #[test]
    fn test_section_ids_are_monotonic() {
        let mut adapter = HeterogeneousAdapter::<String>::new();
        let a = adapter.add_section(header("a")).unwrap();
        let b = adapter.add_section(header("b")).unwrap();
        adapter.remove_section(1).unwrap();
        let c = adapter.add_section(header("c")).unwrap();

        assert_eq!(a.id().get(), 1);
        assert_eq!(b.id().get(), 2);
        assert_eq!(c.id().get(), 3);
    }

    #[test]
    fn test_section_ids_stop_before_codes_collide() {
        let mut adapter = HeterogeneousAdapter::<String>::new();
        adapter
            .add_section(SingletonSection::new(
                "ranged".to_string(),
                label().with_subtype(|_, _| Subtype::new(52)),
            ))
            .unwrap();

        adapter.last_section_id = Some(SectionId::from_raw(SectionId::MAX.get() - 1));
        let last = adapter.add_section(header("undefined")).unwrap();
        assert_eq!(last.id(), SectionId::MAX);

        let ranged_code = adapter.item_type(0).unwrap();
        let undefined_code = adapter.item_type(1).unwrap();
        assert_ne!(ranged_code, undefined_code);
        assert_eq!(adapter.section_by_type_code(ranged_code), Some(0));
        assert_eq!(adapter.section_by_type_code(undefined_code), Some(1));

        let err = adapter.add_section(header("overflow")).unwrap_err();
        assert!(matches!(err, AdapterError::SectionIdsExhausted));
        assert_eq!(adapter.section_count(), 2);
    }

    #[test]
    fn test_insert_section_at_index() {
        let mut adapter = HeterogeneousAdapter::<String>::new();
        adapter.add_section(header("first")).unwrap();
        adapter.add_section(header("last")).unwrap();
        let middle = adapter.insert_section(1, header("middle")).unwrap();

        assert_eq!(adapter.section_index(&middle), Some(1));
        assert_eq!(adapter.section_count(), 3);

        let err = adapter.insert_section(9, header("bad")).unwrap_err();
        assert!(matches!(
            err,
            AdapterError::SectionIndexOutOfRange { index: 9, len: 3 }
        ));
    }

    #[test]
    fn test_lookup_skips_hidden_sections() {
        let mut adapter = HeterogeneousAdapter::<String>::new();
        adapter.add_section(header("Header")).unwrap();
        let hidden = adapter.add_section(entries(&["x", "y"])).unwrap();
        adapter.add_section(entries(&["a", "b"])).unwrap();

        adapter.edit(&hidden, |section| section.set_visible(false));

        assert_eq!(adapter.flat_count(), 3);
        assert_eq!(adapter.lookup_coordinates(1).get(), Some((2, 0)));
        assert_eq!(adapter.leading_count(2), Some(1));
        assert_eq!(adapter.leading_count_of(&hidden), Some(1));
        assert_eq!(adapter.leading_count(3), None);
    }

    #[test]
    fn test_out_of_range_position() {
        let mut adapter = HeterogeneousAdapter::<String>::new();
        adapter.add_section(entries(&["a"])).unwrap();

        assert!(!adapter.lookup_coordinates(1).is_known());
        assert!(matches!(
            adapter.item_type(1),
            Err(AdapterError::PositionOutOfRange { position: 1, count: 1 })
        ));
        assert!(adapter.item_id(5).is_err());
    }

    #[test]
    fn test_item_type_zips_section_id() {
        let mut adapter = HeterogeneousAdapter::<String>::new();
        adapter.add_section(header("Header")).unwrap();
        let colors = ListSection::new(
            vec!["Red".to_string(), "Blue".to_string()],
            label().with_subtype(|item: &String, _| {
                if item.eq_ignore_ascii_case("red") {
                    Subtype::new(1)
                } else {
                    Subtype::new(2)
                }
            }),
        );
        adapter.add_section(colors).unwrap();

        assert_eq!(adapter.item_type(1).unwrap(), TypeCode::from_raw(201));
        assert_eq!(adapter.item_type(2).unwrap(), TypeCode::from_raw(202));

        let header_code = adapter.item_type(0).unwrap();
        assert_eq!(header_code.unzip(SectionId::FIRST), Some(Subtype::UNDEFINED));
        assert_eq!(adapter.section_by_type_code(header_code), Some(0));
        assert_eq!(adapter.known_type_codes().len(), 3);
    }

    #[test]
    fn test_shared_item_types() {
        let mut adapter = HeterogeneousAdapter::<String>::shared();
        let renderer = || label().with_subtype(|_, _| Subtype::new(150));
        adapter
            .add_section(ListSection::new(vec!["a".to_string()], renderer()))
            .unwrap();
        adapter
            .add_section(ListSection::new(vec!["b".to_string()], renderer()))
            .unwrap();

        assert_eq!(adapter.item_type(0).unwrap(), TypeCode::from_raw(150));
        assert_eq!(adapter.item_type(1).unwrap(), TypeCode::from_raw(150));
        // The most recent observation owns the shared code.
        assert_eq!(adapter.section_by_type_code(TypeCode::from_raw(150)), Some(1));

        let holder = adapter.create_view(TypeCode::from_raw(150)).unwrap();
        assert_eq!(holder.type_code().get(), 150);
    }

    #[test]
    fn test_shared_mode_rejects_reserved_code() {
        let mut adapter = HeterogeneousAdapter::<String>::shared();
        adapter
            .add_section(ListSection::new(
                vec!["a".to_string()],
                label().with_subtype(|_, _| Subtype::new(-2)),
            ))
            .unwrap();

        let err = adapter.item_type(0).unwrap_err();
        assert!(err.is_contract_violation());
        assert!(matches!(err, AdapterError::ReservedSubtype { position: 0, section_index: 0 }));
    }

    #[test]
    fn test_item_ids() {
        let mut adapter = HeterogeneousAdapter::<String>::new();
        adapter.add_section(header("Header")).unwrap();
        adapter
            .add_section(ListSection::new(
                vec!["a".to_string(), "b".to_string()],
                label().with_local_id(|_, index| Some(index as u32)),
            ))
            .unwrap();

        assert_eq!(adapter.item_id(0).unwrap(), ItemId::NoId);
        assert_eq!(adapter.item_id(1).unwrap(), ItemId::Stable(2 << 32));
        assert_eq!(adapter.item_id(2).unwrap(), ItemId::Stable((2 << 32) | 1));
    }

    #[test]
    fn test_create_and_bind() {
        let mut adapter = HeterogeneousAdapter::<String>::new();
        adapter.add_section(header("Header")).unwrap();
        adapter.add_section(entries(&["a", "b"])).unwrap();

        let code = adapter.item_type(1).unwrap();
        let mut holder = adapter.create_view(code).unwrap();
        adapter.bind_view(&mut holder, 1).unwrap();
        assert_eq!(holder.view(), "a");

        adapter.bind_view(&mut holder, 2).unwrap();
        assert_eq!(*holder, "b");
    }

    #[test]
    fn test_unknown_type_code() {
        let mut adapter = HeterogeneousAdapter::<String>::new();
        adapter.add_section(header("Header")).unwrap();

        assert!(matches!(
            adapter.create_view(TypeCode::from_raw(12345)),
            Err(AdapterError::UnknownTypeCode(code)) if code.get() == 12345
        ));
        assert!(matches!(
            adapter.create_view(TypeCode::EMPTY),
            Err(AdapterError::MissingEmptyState)
        ));
    }

    #[test]
    fn test_empty_state_row() {
        let mut adapter = HeterogeneousAdapter::<String>::builder()
            .empty_state(
                FnEmptyState::new(|| String::from("empty")).with_update(|view| view.push('!')),
            )
            .build();
        let list = adapter.add_section(entries(&[])).unwrap();

        assert_eq!(adapter.aggregate_count(), 0);
        assert_eq!(adapter.flat_count(), 1);
        assert!(adapter.is_showing_empty_state());
        assert_eq!(adapter.item_type(0).unwrap(), TypeCode::EMPTY);
        assert_eq!(adapter.item_id(0).unwrap(), ItemId::EmptyState);
        assert!(adapter.item_type(1).is_err());

        let mut holder = adapter.create_view(TypeCode::EMPTY).unwrap();
        assert!(holder.is_empty_state());
        adapter.bind_view(&mut holder, 0).unwrap();
        assert_eq!(holder.view(), "empty!");

        adapter.edit(&list, |section| section.push("a".into()));
        assert!(!adapter.is_showing_empty_state());
        assert_eq!(adapter.flat_count(), 1);
        assert_ne!(adapter.item_type(0).unwrap(), TypeCode::EMPTY);

        adapter.clear_empty_state();
        assert!(!adapter.has_empty_state());
    }

    #[test]
    fn test_take_section_invalidates_handle() {
        let mut adapter = HeterogeneousAdapter::<String>::new();
        let list = adapter.add_section(entries(&["a", "b"])).unwrap();
        adapter.item_type(0).unwrap();

        let taken = adapter.take_section(&list).unwrap();
        assert_eq!(taken.len(), 2);
        assert!(adapter.known_type_codes().is_empty());
        assert!(adapter.get(&list).is_none());
        assert!(adapter.take_section(&list).is_none());
        assert!(adapter.edit(&list, |section| section.clear()).is_none());
        assert_eq!(adapter.notify_section_items_changed(&list, 0, 1), None);
    }

    #[test]
    fn test_section_accessors() {
        let mut adapter = HeterogeneousAdapter::<String>::new();
        let head = adapter.add_section(header("Header")).unwrap();
        adapter.add_section(entries(&["a"])).unwrap();

        assert!(adapter.section_as::<ListSection<String, String>>(0).is_none());
        assert_eq!(
            adapter.section_as::<ListSection<String, String>>(1).map(|s| s.len()),
            Some(1)
        );
        assert_eq!(adapter.section(1).map(|s| s.size()), Some(1));
        assert_eq!(adapter.section_id(0), Some(head.id()));

        adapter
            .section_as_mut::<ListSection<String, String>>(1)
            .unwrap()
            .push("b".into());
        adapter.notify_data_set_changed();
        assert_eq!(adapter.flat_count(), 3);

        adapter.get_mut(&head).unwrap().set_data("Renamed".into());
        assert_eq!(adapter.get(&head).map(|s| s.data().as_str()), Some("Renamed"));
    }

    #[test]
    fn test_mutations_emit_refresh() {
        let mut adapter = HeterogeneousAdapter::<String>::new();
        let refreshes = Arc::new(Mutex::new(0));

        let recv = refreshes.clone();
        adapter.signals().data_set_changed.connect(move |_| {
            *recv.lock() += 1;
        });

        let list = adapter.add_section(entries(&["a"])).unwrap();
        adapter.edit(&list, |section| section.push("b".into()));
        adapter.remove_section(0).unwrap();

        assert_eq!(*refreshes.lock(), 3);
    }

    #[test]
    fn test_local_range_notifications() {
        let mut adapter = HeterogeneousAdapter::<String>::new();
        adapter.add_section(header("Header")).unwrap();
        let list = adapter.add_section(entries(&["a", "b", "c"])).unwrap();

        let inserted = Arc::new(Mutex::new(Vec::new()));
        let recv = inserted.clone();
        adapter
            .signals()
            .items_inserted
            .connect(move |(start, count)| {
                recv.lock().push((*start, *count));
            });

        adapter.get_mut(&list).unwrap().insert(1, "new".into());
        assert_eq!(adapter.notify_section_items_inserted(&list, 1, 1), Some(2));
        assert_eq!(adapter.notify_section_items_removed(&list, 0, 1), Some(1));
        assert_eq!(*inserted.lock(), vec![(2, 1)]);
    }

    #[test]
    fn test_prune_type_codes_on_refresh() {
        let mut adapter = HeterogeneousAdapter::<String>::with_config(
            AdapterConfig::new().with_prune_type_codes_on_refresh(true),
        );
        adapter.add_section(header("Header")).unwrap();
        let code = adapter.item_type(0).unwrap();
        assert_eq!(adapter.known_type_codes(), vec![code]);

        adapter.notify_data_set_changed();
        assert!(adapter.known_type_codes().is_empty());
        assert!(adapter.create_view(code).is_err());
    }

    #[test]
    fn test_type_codes_are_append_only_by_default() {
        let mut adapter = HeterogeneousAdapter::<String>::new();
        adapter.add_section(header("Header")).unwrap();
        let code = adapter.item_type(0).unwrap();

        adapter.notify_data_set_changed();
        assert_eq!(adapter.known_type_codes(), vec![code]);

        adapter.reset_type_codes();
        assert!(adapter.known_type_codes().is_empty());
    }
}
