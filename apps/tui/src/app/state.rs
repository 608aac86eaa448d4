use coffee_finder::context::{CoffeeDetail, RoasterProfile};
use coffee_finder::db::models::LocationFilterParams;
use coffee_finder::domain::{Category, Coffee, Coordinate, Location};
use coffee_finder::filter::{
    derive_facet_options, CoffeeFacet, FacetOptions, FilterState, LocationFacet, Pipeline,
    SearchMode, SortKey,
};
use coffee_finder::map::{nearest_marker, step_marker, MapRegion};
use coffee_finder::selection::{ListViewport, ScrollOutcome, SelectionCoordinator};
use coffee_finder::AppContext;
use color_eyre::Result;
use ratatui::layout::Rect;
use tracing::{debug, info};

/// Click radius around a marker, in terminal cells.
const MARKER_HIT_RADIUS: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Discover,
    CoffeeDetail,
    Roaster,
    WhereToFind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

#[derive(Debug)]
pub struct DiscoverState {
    pub coffees: Vec<Coffee>,
    pub options: FacetOptions<CoffeeFacet>,
    pub filter: FilterState<CoffeeFacet>,
    /// Cursor over the active facet's value chips.
    pub chip_index: usize,
    pub sort: SortKey,
    pub query: String,
    pub pipeline: Pipeline<CoffeeFacet>,
    pub selected_index: usize,
    pub viewport: ListViewport,
}

impl DiscoverState {
    pub fn new(coffees: Vec<Coffee>) -> Self {
        Self {
            options: derive_facet_options(&coffees),
            coffees,
            filter: FilterState::default(),
            chip_index: 0,
            sort: SortKey::default(),
            query: String::new(),
            pipeline: Pipeline::new(SearchMode::Substring),
            selected_index: 0,
            viewport: ListViewport::default(),
        }
    }

    pub fn refresh(&mut self) {
        let len = self
            .pipeline
            .visible(
                &self.coffees,
                std::slice::from_ref(&self.filter),
                self.sort,
                &self.query,
            )
            .len();
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
        self.viewport.set_len(len);
        self.viewport.ensure_visible(self.selected_index);
    }

    pub fn visible(&self) -> impl Iterator<Item = &Coffee> + '_ {
        self.pipeline.cached().iter().map(|&i| &self.coffees[i])
    }

    pub fn selected_coffee(&self) -> Option<&Coffee> {
        self.pipeline
            .cached()
            .get(self.selected_index)
            .map(|&i| &self.coffees[i])
    }

    /// Values offered for the active facet.
    pub fn chips(&self) -> &[String] {
        self.filter
            .active()
            .map(|facet| self.options.get(facet))
            .unwrap_or_default()
    }

    pub fn choose_facet(&mut self, facet: CoffeeFacet) {
        self.filter.choose_facet(facet);
        self.chip_index = 0;
    }

    pub fn toggle_chip(&mut self) {
        if let Some(value) = self.chips().get(self.chip_index).cloned() {
            self.filter.toggle_value(&value);
        }
    }
}

#[derive(Debug)]
pub struct FinderState {
    /// Coffee the finder was opened for, `None` for every location.
    pub coffee: Option<Coffee>,
    pub title: String,
    pub locations: Vec<Location>,
    pub options: FacetOptions<LocationFacet>,
    pub category: FilterState<LocationFacet>,
    pub city: FilterState<LocationFacet>,
    pub query: String,
    pub pipeline: Pipeline<LocationFacet>,
    pub coordinator: SelectionCoordinator,
    pub viewport: ListViewport,
    pub region: MapRegion,
    pub last_sync: ScrollOutcome,
    /// Inner map area from the last frame, used for click hit testing.
    pub map_area: Option<Rect>,
    visible_ids: Vec<String>,
    fitted_for: usize,
}

impl FinderState {
    pub fn new(coffee: Option<Coffee>, locations: Vec<Location>) -> Self {
        let title = coffee.as_ref().map_or_else(
            || "Where to find coffee".to_string(),
            |coffee| format!("Where to find {}", coffee.name),
        );
        Self {
            coffee,
            title,
            options: derive_facet_options(&locations),
            region: MapRegion::fit(locations.iter().map(|l| l.coordinate)),
            locations,
            category: FilterState::default(),
            city: FilterState::default(),
            query: String::new(),
            pipeline: Pipeline::new(SearchMode::Fuzzy),
            coordinator: SelectionCoordinator::new(),
            viewport: ListViewport::default(),
            last_sync: ScrollOutcome::Cleared,
            map_area: None,
            visible_ids: Vec::new(),
            fitted_for: 0,
        }
    }

    /// Re-derives the visible set, refits the map when it changed and lets
    /// the coordinator bring the selection into view.
    pub fn refresh(&mut self) {
        let filters = [self.category.clone(), self.city.clone()];
        let visible = self
            .pipeline
            .visible(&self.locations, &filters, SortKey::Insertion, &self.query);

        self.visible_ids = visible
            .iter()
            .map(|&i| self.locations[i].id.clone())
            .collect();

        if self.pipeline.recomputations() != self.fitted_for {
            self.fitted_for = self.pipeline.recomputations();
            self.region = MapRegion::fit(self.visible().map(|l| l.coordinate));
        }

        self.viewport.set_len(self.visible_ids.len());
        let outcome = self.coordinator.sync(&self.visible_ids, &mut self.viewport);
        if outcome != ScrollOutcome::Unchanged {
            debug!(?outcome, "selection synced");
            self.last_sync = outcome;
        }
    }

    pub fn visible(&self) -> impl Iterator<Item = &Location> + '_ {
        self.pipeline.cached().iter().map(|&i| &self.locations[i])
    }

    pub fn visible_ids(&self) -> &[String] {
        &self.visible_ids
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.coordinator.index_in(&self.visible_ids)
    }

    pub fn selected_location(&self) -> Option<&Location> {
        let id = self.coordinator.selected()?;
        self.locations.iter().find(|l| l.id == id)
    }

    /// Labelled rows for the info pane of the selected location. Stocked
    /// coffees are named from `catalogue`, falling back to their ids.
    pub fn selected_info(&self, catalogue: &[Coffee]) -> Option<Vec<(&'static str, String)>> {
        let location = self.selected_location()?;
        let coffee = |id: &str| catalogue.iter().find(|c| c.id == id);

        let mut place = format!("{}, {}", location.address, location.city);
        if let Some(country) = location.country.as_deref() {
            place.push_str(", ");
            place.push_str(country);
        }

        let mut rows = vec![
            ("Name", location.name.clone()),
            ("Address", place),
            (
                "Status",
                if location.is_open { "Open" } else { "Closed" }.to_string(),
            ),
        ];
        if let Some(phone) = location.phone.as_deref() {
            rows.push(("Phone", phone.to_string()));
        }
        if let Some(website) = location.website.as_deref() {
            rows.push(("Website", website.to_string()));
        }
        if let Some(roaster) = location.roaster_id.as_deref().and_then(|id| {
            catalogue
                .iter()
                .find(|c| c.roaster_id == id)
                .and_then(|c| c.roaster_name.clone())
        }) {
            rows.push(("Roaster", roaster));
        }

        let stocked: Vec<&str> = location
            .coffee_ids
            .iter()
            .map(|id| coffee(id).map_or(id.as_str(), |c| c.name.as_str()))
            .collect();
        rows.push((
            "Stocks",
            if stocked.is_empty() {
                "-".to_string()
            } else {
                stocked.join(", ")
            },
        ));
        Some(rows)
    }

    pub fn city_chips(&self) -> &[String] {
        self.options.get(LocationFacet::City)
    }

    /// Number keys pick a category chip; the same chip again clears it.
    pub fn choose_category(&mut self, category: Category) {
        self.category
            .choose_single(LocationFacet::Category, category.as_str());
    }

    /// Steps through "all cities" followed by each known city.
    pub fn cycle_city(&mut self) {
        let cities = self.city_chips();
        let next = match self.city.selected().first() {
            None => cities.first().cloned(),
            Some(current) => cities
                .iter()
                .position(|c| c == current)
                .and_then(|pos| cities.get(pos + 1))
                .cloned(),
        };

        match next {
            Some(city) => self.city.choose_single(LocationFacet::City, &city),
            None => self.city.clear(),
        }
    }

    /// List navigation: moves the selection one row up or down.
    pub fn move_selection(&mut self, down: bool) {
        if self.visible_ids.is_empty() {
            return;
        }
        let last = self.visible_ids.len() - 1;
        let next = match self.selected_index() {
            None if down => 0,
            None => last,
            Some(i) if down => (i + 1).min(last),
            Some(i) => i.saturating_sub(1),
        };
        self.coordinator.select(self.visible_ids[next].clone());
    }

    /// Map navigation: moves to the neighbouring marker west or east.
    pub fn step_on_map(&mut self, east: bool) {
        let coordinates: Vec<Coordinate> = self.visible().map(|l| l.coordinate).collect();
        if let Some(next) = step_marker(&coordinates, self.selected_index(), east) {
            self.coordinator.select(self.visible_ids[next].clone());
        }
    }

    /// Marker tap. Returns whether a marker was hit.
    pub fn click(&mut self, column: u16, row: u16) -> bool {
        let Some(area) = self.map_area else {
            return false;
        };
        if area.width == 0
            || area.height == 0
            || column < area.x
            || row < area.y
            || column >= area.x + area.width
            || row >= area.y + area.height
        {
            return false;
        }

        let click = (
            f64::from(column - area.x) + 0.5,
            f64::from(row - area.y) + 0.5,
        );
        let size = (f64::from(area.width), f64::from(area.height));
        let coordinates: Vec<Coordinate> = self.visible().map(|l| l.coordinate).collect();

        match nearest_marker(&self.region, &coordinates, click, size, MARKER_HIT_RADIUS) {
            Some(index) => {
                self.coordinator.select(self.visible_ids[index].clone());
                true
            }
            None => false,
        }
    }

    pub fn center_on_selection(&mut self) {
        if let Some(location) = self.selected_location() {
            self.region = self.region.centered_on(location.coordinate);
        }
    }

    pub fn fit_to_visible(&mut self) {
        self.region = MapRegion::fit(self.visible().map(|l| l.coordinate));
    }
}

#[derive(Debug)]
pub struct DetailState {
    pub detail: CoffeeDetail,
    pub roaster_coffees: Vec<Coffee>,
    pub review_offset: usize,
}

#[derive(Debug)]
pub struct RoasterState {
    pub profile: RoasterProfile,
    /// Cursor over the roaster's coffees.
    pub selected_index: usize,
}

impl RoasterState {
    pub const fn new(profile: RoasterProfile) -> Self {
        Self {
            profile,
            selected_index: 0,
        }
    }

    pub fn move_selection(&mut self, down: bool) {
        let last = self.profile.coffees.len().saturating_sub(1);
        self.selected_index = if down {
            (self.selected_index + 1).min(last)
        } else {
            self.selected_index.saturating_sub(1)
        };
    }

    pub fn selected_coffee(&self) -> Option<&Coffee> {
        self.profile.coffees.get(self.selected_index)
    }
}

#[derive(Debug)]
pub struct App {
    pub context: AppContext,
    pub running: bool,
    pub screen: AppScreen,
    pub input_mode: InputMode,
    pub show_help: bool,
    pub status_message: String,
    pub discover: DiscoverState,
    pub detail: Option<DetailState>,
    pub roaster: Option<RoasterState>,
    pub finder: Option<FinderState>,
    /// Screen to return to when leaving the finder.
    pub finder_return: AppScreen,
}

impl App {
    pub fn new(context: AppContext) -> Self {
        Self {
            context,
            running: true,
            screen: AppScreen::Discover,
            input_mode: InputMode::Normal,
            show_help: false,
            status_message: String::new(),
            discover: DiscoverState::new(Vec::new()),
            detail: None,
            roaster: None,
            finder: None,
            finder_return: AppScreen::Discover,
        }
    }

    pub async fn load_catalogue(&mut self) -> Result<()> {
        let coffees = self.context.coffees().await?;
        info!(count = coffees.len(), "catalogue loaded");
        if coffees.is_empty() {
            self.status_message = "No coffees yet. Run with --seed for demo data.".to_string();
        }
        self.discover = DiscoverState::new(coffees);
        self.discover.refresh();
        Ok(())
    }

    /// Per-frame derivations that do not depend on input.
    pub fn update(&mut self) {
        match self.screen {
            AppScreen::Discover => self.discover.refresh(),
            AppScreen::WhereToFind => {
                if let Some(finder) = self.finder.as_mut() {
                    finder.refresh();
                }
            }
            AppScreen::CoffeeDetail | AppScreen::Roaster => {}
        }
    }

    pub async fn open_detail(&mut self) -> Result<()> {
        let Some(coffee_id) = self.discover.selected_coffee().map(|c| c.id.clone()) else {
            return Ok(());
        };
        self.show_detail(&coffee_id).await
    }

    async fn show_detail(&mut self, coffee_id: &str) -> Result<()> {
        let Some(detail) = self.context.coffee_detail(coffee_id).await? else {
            self.status_message = format!("Coffee {coffee_id} no longer exists");
            return Ok(());
        };

        let roaster_coffees = self
            .context
            .roaster_with_coffees(&detail.coffee.roaster_id)
            .await?
            .map(|(_, coffees)| {
                coffees
                    .into_iter()
                    .filter(|c| c.id != detail.coffee.id)
                    .collect()
            })
            .unwrap_or_default();

        self.detail = Some(DetailState {
            detail,
            roaster_coffees,
            review_offset: 0,
        });
        self.screen = AppScreen::CoffeeDetail;
        self.status_message.clear();
        Ok(())
    }

    /// Opens the profile of the roaster behind the coffee on the detail
    /// screen.
    pub async fn open_roaster(&mut self) -> Result<()> {
        let Some(roaster_id) = self
            .detail
            .as_ref()
            .map(|d| d.detail.coffee.roaster_id.clone())
        else {
            return Ok(());
        };

        let Some(profile) = self.context.roaster_profile(&roaster_id).await? else {
            self.status_message = format!("Roaster {roaster_id} not found");
            return Ok(());
        };

        info!(roaster = %profile.roaster.name, "roaster opened");
        self.roaster = Some(RoasterState::new(profile));
        self.screen = AppScreen::Roaster;
        self.status_message.clear();
        Ok(())
    }

    pub fn close_roaster(&mut self) {
        self.roaster = None;
        self.screen = AppScreen::CoffeeDetail;
    }

    /// Swaps the detail screen over to the coffee under the roaster cursor.
    pub async fn open_roaster_coffee(&mut self) -> Result<()> {
        let Some(coffee_id) = self
            .roaster
            .as_ref()
            .and_then(RoasterState::selected_coffee)
            .map(|c| c.id.clone())
        else {
            return Ok(());
        };
        self.roaster = None;
        self.show_detail(&coffee_id).await
    }

    /// Opens the finder for the coffee on the detail screen, the roaster on
    /// the profile screen, or for every location when called from discover.
    pub async fn open_finder(&mut self) -> Result<()> {
        let mut title = None;
        let (coffee, locations) = match (self.screen, self.detail.as_ref()) {
            (AppScreen::CoffeeDetail, Some(detail)) => {
                let coffee = detail.detail.coffee.clone();
                let locations = self.context.coffee_locations(&coffee.id).await?;
                (Some(coffee), locations)
            }
            (AppScreen::Roaster, _) => match self.roaster.as_ref() {
                Some(roaster) => {
                    title = Some(format!("{} locations", roaster.profile.roaster.name));
                    (None, roaster.profile.locations.clone())
                }
                None => return Ok(()),
            },
            _ => (
                None,
                self.context
                    .locations(&LocationFilterParams::default())
                    .await?,
            ),
        };

        if locations.is_empty() {
            self.status_message = "No locations found".to_string();
        } else {
            self.status_message.clear();
        }

        self.finder_return = self.screen;
        let mut finder = FinderState::new(coffee, locations);
        if let Some(title) = title {
            finder.title = title;
        }
        self.finder = Some(finder);
        self.screen = AppScreen::WhereToFind;
        self.input_mode = InputMode::Normal;
        self.update();
        Ok(())
    }

    pub fn close_finder(&mut self) {
        self.finder = None;
        self.screen = self.finder_return;
        self.input_mode = InputMode::Normal;
    }

    pub fn handle_click(&mut self, column: u16, row: u16) {
        if self.screen != AppScreen::WhereToFind
            || !self.context.renderer().supports_hit_testing()
        {
            return;
        }
        if let Some(finder) = self.finder.as_mut() {
            if finder.click(column, row) {
                finder.refresh();
            }
        }
    }

    /// Query text bound to the current screen's search box.
    pub fn search_query_mut(&mut self) -> Option<&mut String> {
        match self.screen {
            AppScreen::Discover => Some(&mut self.discover.query),
            AppScreen::WhereToFind => self.finder.as_mut().map(|f| &mut f.query),
            AppScreen::CoffeeDetail | AppScreen::Roaster => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coffee_finder::config::AppConfig;
    use coffee_finder::db::create_memory_pool;
    use coffee_finder::domain::Category;
    use std::path::Path;

    fn location(id: &str, city: &str, category: Category, lat: f64, lon: f64) -> Location {
        Location {
            id: id.to_string(),
            name: format!("Spot {id}"),
            address: format!("{id} street"),
            city: city.to_string(),
            country: None,
            coordinate: Coordinate {
                latitude: lat,
                longitude: lon,
            },
            category,
            is_open: true,
            is_primary: false,
            distance: None,
            roaster_id: None,
            phone: None,
            website: None,
            coffee_ids: Vec::new(),
        }
    }

    fn finder() -> FinderState {
        let mut finder = FinderState::new(
            None,
            vec![
                location("a", "Barcelona", Category::Cafe, 41.39, 2.16),
                location("b", "Barcelona", Category::Roastery, 41.38, 2.18),
                location("c", "Madrid", Category::Shop, 40.42, -3.70),
            ],
        );
        finder.refresh();
        finder
    }

    #[test]
    fn list_moves_select_through_coordinator() {
        let mut finder = finder();
        finder.move_selection(true);
        finder.refresh();
        assert_eq!(finder.coordinator.selected(), Some("a"));

        finder.move_selection(true);
        finder.move_selection(true);
        finder.move_selection(true);
        finder.refresh();
        assert_eq!(finder.coordinator.selected(), Some("c"));
        assert!(matches!(
            finder.last_sync,
            ScrollOutcome::Estimated { index: 2, .. } | ScrollOutcome::Scrolled { index: 2 }
        ));
    }

    #[test]
    fn filtered_out_selection_is_left_dangling() {
        let mut finder = finder();
        finder.coordinator.select("c");
        finder.refresh();

        finder.cycle_city();
        finder.refresh();
        assert_eq!(finder.visible_ids(), ["a", "b"]);
        assert_eq!(finder.coordinator.selected(), Some("c"));
        assert_eq!(finder.selected_index(), None);
        assert_eq!(finder.last_sync, ScrollOutcome::NotVisible);
    }

    #[test]
    fn city_chips_cycle_back_to_all() {
        let mut finder = finder();
        finder.cycle_city();
        assert_eq!(finder.city.selected(), ["Barcelona"]);
        finder.cycle_city();
        assert_eq!(finder.city.selected(), ["Madrid"]);
        finder.cycle_city();
        assert!(finder.city.is_empty());
    }

    #[test]
    fn category_chip_toggles() {
        let mut finder = finder();
        finder.choose_category(Category::Roastery);
        finder.refresh();
        assert_eq!(finder.visible_ids(), ["b"]);

        finder.choose_category(Category::Roastery);
        finder.refresh();
        assert_eq!(finder.visible_ids().len(), 3);
    }

    #[test]
    fn map_click_selects_nearest_marker() {
        let mut finder = finder();
        finder.choose_category(Category::Cafe);
        finder.refresh();
        let area = Rect::new(10, 5, 40, 20);
        finder.map_area = Some(area);

        // a single marker sits at the centre of the fitted region
        assert!(finder.click(30, 15));
        assert_eq!(finder.coordinator.selected(), Some("a"));

        assert!(!finder.click(10, 5));
        assert!(!finder.click(0, 0));
    }

    #[test]
    fn map_arrows_step_by_longitude() {
        let mut finder = finder();
        finder.step_on_map(true);
        assert_eq!(finder.coordinator.selected(), Some("c"));
        finder.step_on_map(true);
        assert_eq!(finder.coordinator.selected(), Some("a"));
        finder.step_on_map(false);
        assert_eq!(finder.coordinator.selected(), Some("c"));
    }

    #[test]
    fn selected_location_info_lists_contacts_and_stock() {
        let mut finder = finder();
        assert!(finder.selected_info(&[]).is_none());

        if let Some(spot) = finder.locations.iter_mut().find(|l| l.id == "b") {
            spot.country = Some("Spain".to_string());
            spot.phone = Some("+34 600 000 000".to_string());
            spot.website = Some("https://spot.example".to_string());
            spot.is_open = false;
            spot.coffee_ids = vec!["x".to_string(), "gone".to_string()];
        }
        let catalogue = [Coffee {
            id: "x".to_string(),
            roaster_id: "r".to_string(),
            roaster_name: Some("Roaster R".to_string()),
            name: "Lot X".to_string(),
            origin: None,
            region: None,
            process: None,
            roast_level: None,
            tasting_notes: None,
            altitude: None,
            varietal: None,
            created_at: String::new(),
        }];

        finder.coordinator.select("b");
        let rows = finder.selected_info(&catalogue).unwrap_or_default();
        let value = |label: &str| {
            rows.iter()
                .find(|(l, _)| *l == label)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(value("Address"), Some("b street, Barcelona, Spain"));
        assert_eq!(value("Status"), Some("Closed"));
        assert_eq!(value("Phone"), Some("+34 600 000 000"));
        assert_eq!(value("Website"), Some("https://spot.example"));
        assert_eq!(value("Stocks"), Some("Lot X, gone"));
        assert_eq!(value("Roaster"), None);

        finder.coordinator.select("a");
        let rows = finder.selected_info(&catalogue).unwrap_or_default();
        assert!(!rows.iter().any(|(label, _)| *label == "Phone"));
        assert!(rows.contains(&("Stocks", "-".to_string())));
    }

    #[tokio::test]
    async fn roaster_profile_opens_from_detail() -> Result<(), Box<dyn std::error::Error>> {
        let config = AppConfig::from_lookup(Path::new("/tmp"), |_| None)?;
        let context = AppContext::with_pool(create_memory_pool().await?, config);
        context.seed().await?;
        let mut app = App::new(context);
        app.load_catalogue().await?;

        // nothing to open before a coffee is on screen
        app.open_roaster().await?;
        assert_eq!(app.screen, AppScreen::Discover);

        app.open_detail().await?;
        app.open_roaster().await?;
        assert_eq!(app.screen, AppScreen::Roaster);
        let roaster = app.roaster.as_ref().ok_or("no roaster state")?;
        assert_eq!(roaster.profile.roaster.name, "Nomad Coffee");
        assert_eq!(
            roaster.profile.roaster.website.as_deref(),
            Some("https://nomadcoffee.es")
        );
        assert_eq!(roaster.profile.coffees.len(), 3);
        assert_eq!(roaster.profile.locations.len(), 4);

        app.open_finder().await?;
        let finder = app.finder.as_ref().ok_or("no finder")?;
        assert_eq!(finder.title, "Nomad Coffee locations");
        assert_eq!(finder.visible_ids(), ["loc-1", "loc-2", "loc-4", "loc-6"]);
        app.close_finder();
        assert_eq!(app.screen, AppScreen::Roaster);

        if let Some(roaster) = app.roaster.as_mut() {
            roaster.move_selection(true);
        }
        app.open_roaster_coffee().await?;
        assert_eq!(app.screen, AppScreen::CoffeeDetail);
        assert!(app.roaster.is_none());
        let detail = app.detail.as_ref().ok_or("no detail")?;
        assert_eq!(detail.detail.coffee.id, "sidra-las-flores");

        Ok(())
    }

    #[tokio::test]
    async fn finder_info_names_stocked_coffees() -> Result<(), Box<dyn std::error::Error>> {
        let config = AppConfig::from_lookup(Path::new("/tmp"), |_| None)?;
        let context = AppContext::with_pool(create_memory_pool().await?, config);
        context.seed().await?;
        let mut app = App::new(context);
        app.load_catalogue().await?;

        app.open_finder().await?;
        let finder = app.finder.as_mut().ok_or("no finder")?;
        finder.coordinator.select("loc-4");
        let rows = finder
            .selected_info(&app.discover.coffees)
            .ok_or("no selection")?;
        assert!(rows.contains(&("Phone", "+34 933 15 98 73".to_string())));
        assert!(rows.contains(&("Roaster", "Nomad Coffee".to_string())));
        assert!(rows.contains(&(
            "Stocks",
            "Fellow Farms, Kochere, House Espresso".to_string()
        )));

        Ok(())
    }

    #[test]
    fn discover_chips_follow_active_facet() {
        let coffee = |id: &str, origin: &str| Coffee {
            id: id.to_string(),
            roaster_id: "r".to_string(),
            roaster_name: None,
            name: id.to_string(),
            origin: Some(origin.to_string()),
            region: None,
            process: None,
            roast_level: None,
            tasting_notes: None,
            altitude: None,
            varietal: None,
            created_at: String::new(),
        };
        let mut discover = DiscoverState::new(vec![coffee("x", "Kenya"), coffee("y", "Brazil")]);
        assert!(discover.chips().is_empty());

        discover.choose_facet(CoffeeFacet::Origin);
        assert_eq!(discover.chips(), ["Brazil", "Kenya"]);

        discover.chip_index = 1;
        discover.toggle_chip();
        discover.refresh();
        assert_eq!(discover.selected_coffee().map(|c| c.id.as_str()), Some("x"));
    }
}
