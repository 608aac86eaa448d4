//! Client-side facet filtering, sorting and search over loaded collections.

use crate::domain::{Coffee, Location};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt::Debug;
use std::hash::Hash;

/// A filterable dimension of an entity.
pub trait Facet: Copy + Eq + Hash + Debug + 'static {
    fn all() -> &'static [Self];

    /// Multi-valued facets match when any entity value is selected.
    fn is_multi_valued(self) -> bool;

    fn label(self) -> &'static str;
}

/// An entity that can be filtered and sorted by the pipeline.
pub trait Faceted {
    type Facet: Facet;

    fn display_name(&self) -> &str;

    /// Values for a facet. Categorical facets yield at most one value.
    fn facet_values(&self, facet: Self::Facet) -> Vec<&str>;

    /// Fields searched by the free-text box.
    fn search_fields(&self) -> Vec<&str>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoffeeFacet {
    Origin,
    Process,
    RoastLevel,
    TastingNotes,
}

impl CoffeeFacet {
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Origin),
            1 => Some(Self::Process),
            2 => Some(Self::RoastLevel),
            3 => Some(Self::TastingNotes),
            _ => None,
        }
    }
}

impl Facet for CoffeeFacet {
    fn all() -> &'static [Self] {
        &[
            Self::Origin,
            Self::Process,
            Self::RoastLevel,
            Self::TastingNotes,
        ]
    }

    fn is_multi_valued(self) -> bool {
        matches!(self, Self::TastingNotes)
    }

    fn label(self) -> &'static str {
        match self {
            Self::Origin => "Origin",
            Self::Process => "Process",
            Self::RoastLevel => "Roast Level",
            Self::TastingNotes => "Tasting Notes",
        }
    }
}

impl Faceted for Coffee {
    type Facet = CoffeeFacet;

    fn display_name(&self) -> &str {
        &self.name
    }

    fn facet_values(&self, facet: CoffeeFacet) -> Vec<&str> {
        match facet {
            CoffeeFacet::Origin => self.origin.as_deref().into_iter().collect(),
            CoffeeFacet::Process => self.process.as_deref().into_iter().collect(),
            CoffeeFacet::RoastLevel => self.roast_level.as_deref().into_iter().collect(),
            CoffeeFacet::TastingNotes => self
                .tasting_notes
                .iter()
                .flatten()
                .map(String::as_str)
                .collect(),
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.origin.as_deref());
        fields
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationFacet {
    City,
    Category,
}

impl Facet for LocationFacet {
    fn all() -> &'static [Self] {
        &[Self::City, Self::Category]
    }

    fn is_multi_valued(self) -> bool {
        false
    }

    fn label(self) -> &'static str {
        match self {
            Self::City => "City",
            Self::Category => "Type",
        }
    }
}

impl Faceted for Location {
    type Facet = LocationFacet;

    fn display_name(&self) -> &str {
        &self.name
    }

    fn facet_values(&self, facet: LocationFacet) -> Vec<&str> {
        match facet {
            LocationFacet::City => vec![self.city.as_str()],
            LocationFacet::Category => vec![self.category.as_str()],
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.address.as_str()]
    }
}

/// Distinct values per facet, sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetOptions<F: Facet> {
    options: Vec<(F, Vec<String>)>,
}

impl<F: Facet> FacetOptions<F> {
    pub fn get(&self, facet: F) -> &[String] {
        self.options
            .iter()
            .find(|(f, _)| *f == facet)
            .map(|(_, values)| values.as_slice())
            .unwrap_or_default()
    }
}

pub fn derive_facet_options<T: Faceted>(collection: &[T]) -> FacetOptions<T::Facet> {
    let options = T::Facet::all()
        .iter()
        .map(|&facet| {
            let values: BTreeSet<&str> = collection
                .iter()
                .flat_map(|item| item.facet_values(facet))
                .collect();
            (facet, values.into_iter().map(str::to_string).collect())
        })
        .collect();

    FacetOptions { options }
}

/// One active facet plus the values chosen under it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterState<F: Facet> {
    active: Option<F>,
    selected: Vec<String>,
}

impl<F: Facet> Default for FilterState<F> {
    fn default() -> Self {
        Self {
            active: None,
            selected: Vec::new(),
        }
    }
}

impl<F: Facet> FilterState<F> {
    pub const fn active(&self) -> Option<F> {
        self.active
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, value: &str) -> bool {
        self.selected.iter().any(|v| v == value)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_none() && self.selected.is_empty()
    }

    /// Switches facets, always starting from an empty selection.
    pub fn set_facet(&mut self, facet: Option<F>) {
        if self.active != facet {
            self.selected.clear();
        }
        self.active = facet;
    }

    /// Chip behaviour: choosing the active facet again deactivates it.
    pub fn choose_facet(&mut self, facet: F) {
        if self.active == Some(facet) {
            self.set_facet(None);
        } else {
            self.set_facet(Some(facet));
        }
    }

    /// Adds or removes a value. Ignored when no facet is active.
    pub fn toggle_value(&mut self, value: &str) {
        if self.active.is_none() {
            return;
        }
        if let Some(pos) = self.selected.iter().position(|v| v == value) {
            self.selected.remove(pos);
        } else {
            self.selected.push(value.to_string());
        }
    }

    /// Single-choice chips: selecting the chosen value again clears it.
    pub fn choose_single(&mut self, facet: F, value: &str) {
        let already =
            self.active == Some(facet) && self.selected.len() == 1 && self.is_selected(value);
        self.set_facet(Some(facet));
        self.selected.clear();
        if already {
            self.active = None;
        } else {
            self.selected.push(value.to_string());
        }
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.selected.clear();
    }
}

pub fn matches_filter<T: Faceted>(item: &T, facet: T::Facet, selected: &[String]) -> bool {
    let values = item.facet_values(facet);
    if facet.is_multi_valued() {
        values.iter().any(|v| selected.iter().any(|s| s == v))
    } else {
        values
            .first()
            .is_some_and(|v| selected.iter().any(|s| s == v))
    }
}

/// Indices of `collection` that pass the filter, in original order.
pub fn filter_indices<T: Faceted>(collection: &[T], state: &FilterState<T::Facet>) -> Vec<usize> {
    match state.active {
        Some(facet) if !state.selected.is_empty() => collection
            .iter()
            .enumerate()
            .filter(|(_, item)| matches_filter(*item, facet, &state.selected))
            .map(|(i, _)| i)
            .collect(),
        _ => (0..collection.len()).collect(),
    }
}

pub fn apply_filter<'a, T: Faceted>(
    collection: &'a [T],
    state: &FilterState<T::Facet>,
) -> Vec<&'a T> {
    filter_indices(collection, state)
        .into_iter()
        .map(|i| &collection[i])
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    #[default]
    Insertion,
    NameAsc,
    NameDesc,
}

impl SortKey {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Insertion => "Default",
            Self::NameAsc => "Name A-Z",
            Self::NameDesc => "Name Z-A",
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Insertion => Self::NameAsc,
            Self::NameAsc => Self::NameDesc,
            Self::NameDesc => Self::Insertion,
        }
    }
}

fn fold_char(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

/// Primary comparison ignores case and common Latin diacritics. Ties break
/// on accents, then case with lowercase first, so "apple" < "Apple".
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = |s: &str| -> Vec<char> {
        s.chars()
            .flat_map(char::to_lowercase)
            .map(fold_char)
            .collect()
    };
    let accents = |s: &str| -> Vec<char> { s.chars().flat_map(char::to_lowercase).collect() };
    let cases = |s: &str| -> Vec<bool> { s.chars().map(char::is_uppercase).collect() };

    folded(a)
        .cmp(&folded(b))
        .then_with(|| accents(a).cmp(&accents(b)))
        .then_with(|| cases(a).cmp(&cases(b)))
        .then_with(|| a.cmp(b))
}

/// Stable sort of anything that has a display name.
fn sort_by_name<'n, E>(items: &mut [E], key: SortKey, name: impl Fn(&E) -> &'n str) {
    match key {
        SortKey::Insertion => {}
        SortKey::NameAsc => items.sort_by(|a, b| locale_compare(name(a), name(b))),
        SortKey::NameDesc => items.sort_by(|a, b| locale_compare(name(b), name(a))),
    }
}

/// Stable sort of indices by display name.
pub fn sort_indices<T: Faceted>(collection: &[T], indices: &mut [usize], key: SortKey) {
    sort_by_name(indices, key, |&i| collection[i].display_name());
}

pub fn apply_sort<'a, T: Faceted>(items: &[&'a T], key: SortKey) -> Vec<&'a T> {
    let mut sorted = items.to_vec();
    sort_by_name(&mut sorted, key, |item| item.display_name());
    sorted
}

/// Case-insensitive substring match over the entity's search fields.
pub fn search_matches<T: Faceted>(item: &T, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
}

/// Fuzzy-ranks `indices` against `query`, best match first. Non-matching
/// entries are dropped; an empty query leaves the order untouched.
pub fn fuzzy_rank<T: Faceted>(collection: &[T], indices: &[usize], query: &str) -> Vec<usize> {
    let query = query.trim();
    if query.is_empty() {
        return indices.to_vec();
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let mut scored: Vec<(i64, usize)> = indices
        .iter()
        .filter_map(|&i| {
            collection[i]
                .search_fields()
                .iter()
                .filter_map(|field| matcher.fuzzy_match(field, query))
                .max()
                .map(|score| (score, i))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, i)| i).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    Substring,
    Fuzzy,
}

/// Everything about one entity the pipeline reads: name, facet values in
/// `Facet::all` order, and search fields.
type ItemKey = (String, Vec<Vec<String>>, Vec<String>);

#[derive(Debug, Clone, PartialEq, Eq)]
struct PipelineKey<F: Facet> {
    collection: Vec<ItemKey>,
    filters: Vec<FilterState<F>>,
    sort: SortKey,
    query: String,
}

/// Memoised filter -> search -> sort derivation. Several filter states
/// combine with AND. Results are indices into the collection and are
/// recomputed only when an input changes.
#[derive(Debug, Clone)]
pub struct Pipeline<F: Facet> {
    search_mode: SearchMode,
    key: Option<PipelineKey<F>>,
    visible: Vec<usize>,
    recomputations: usize,
}

impl<F: Facet> Default for Pipeline<F> {
    fn default() -> Self {
        Self::new(SearchMode::Substring)
    }
}

impl<F: Facet> Pipeline<F> {
    pub const fn new(search_mode: SearchMode) -> Self {
        Self {
            search_mode,
            key: None,
            visible: Vec::new(),
            recomputations: 0,
        }
    }

    pub fn visible<T>(
        &mut self,
        collection: &[T],
        filters: &[FilterState<F>],
        sort: SortKey,
        query: &str,
    ) -> &[usize]
    where
        T: Faceted<Facet = F>,
    {
        let key = PipelineKey {
            collection: collection_key(collection),
            filters: filters.to_vec(),
            sort,
            query: query.to_string(),
        };

        if self.key.as_ref() != Some(&key) {
            self.visible = derive_visible(collection, filters, sort, query, self.search_mode);
            self.key = Some(key);
            self.recomputations += 1;
        }

        &self.visible
    }

    /// Last computed result without re-checking inputs.
    pub fn cached(&self) -> &[usize] {
        &self.visible
    }

    pub const fn recomputations(&self) -> usize {
        self.recomputations
    }
}

pub fn derive_visible<T: Faceted>(
    collection: &[T],
    filters: &[FilterState<T::Facet>],
    sort: SortKey,
    query: &str,
    mode: SearchMode,
) -> Vec<usize> {
    let mut filtered: Vec<usize> = (0..collection.len()).collect();
    for state in filters {
        let passing = filter_indices(collection, state);
        filtered.retain(|i| passing.binary_search(i).is_ok());
    }
    let mut visible = match mode {
        SearchMode::Substring => filtered
            .into_iter()
            .filter(|&i| search_matches(&collection[i], query))
            .collect(),
        SearchMode::Fuzzy => fuzzy_rank(collection, &filtered, query),
    };

    // A fuzzy query orders by relevance unless a name sort is chosen.
    sort_indices(collection, &mut visible, sort);
    visible
}

fn collection_key<T: Faceted>(collection: &[T]) -> Vec<ItemKey> {
    let owned = |values: Vec<&str>| -> Vec<String> {
        values.into_iter().map(str::to_string).collect()
    };
    collection
        .iter()
        .map(|item| {
            (
                item.display_name().to_string(),
                T::Facet::all()
                    .iter()
                    .map(|&facet| owned(item.facet_values(facet)))
                    .collect(),
                owned(item.search_fields()),
            )
        })
        .collect()
}
