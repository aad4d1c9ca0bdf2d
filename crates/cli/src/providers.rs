// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Offline directions and map image providers.
//!
//! Neither provider talks to a remote service. Directions are a single
//! straight-line step between the two locations, remembered per location
//! pair. Map images are placeholder SVG files written to a cache directory
//! and named after the route identifier.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use tour_planner::{
    ApiClientConfig, DataProviderFactory, DirectionsProvider, MapImageProvider, ProviderCache,
    ProviderError,
};
use tour_planner_domain::{Route, Step, Tour};
use tracing::{debug, info};
use uuid::Uuid;

/// The only service endpoint the offline providers accept.
pub const OFFLINE_ENDPOINT: &str = "offline";

const IMAGE_EXTENSION: &str = "svg";

/// `(from, to)` as typed by the user.
type RouteKey = (String, String);

/// Routes remembered by the offline directions provider.
type RouteBook = Arc<Mutex<ProviderCache<RouteKey, Route>>>;

/// Builds offline providers, one per distinct [`ApiClientConfig`].
#[derive(Debug)]
pub struct OfflineProviderFactory {
    image_dir: PathBuf,
    route_books: ProviderCache<ApiClientConfig, RouteBook>,
    image_dirs: ProviderCache<ApiClientConfig, PathBuf>,
}

impl OfflineProviderFactory {
    /// Creates a factory whose map images go to `image_dir`.
    #[must_use]
    pub fn new(image_dir: &Path) -> Self {
        Self {
            image_dir: image_dir.to_path_buf(),
            route_books: ProviderCache::new(),
            image_dirs: ProviderCache::new(),
        }
    }
}

fn check_endpoint(config: &ApiClientConfig) -> Result<(), ProviderError> {
    if config.service_endpoint == OFFLINE_ENDPOINT {
        Ok(())
    } else {
        Err(ProviderError::Configuration(format!(
            "unsupported service endpoint '{}', expected '{OFFLINE_ENDPOINT}'",
            config.service_endpoint
        )))
    }
}

impl DataProviderFactory for OfflineProviderFactory {
    fn create_directions_provider(
        &mut self,
        config: &ApiClientConfig,
    ) -> Result<Box<dyn DirectionsProvider>, ProviderError> {
        check_endpoint(config)?;
        let routes: RouteBook = self
            .route_books
            .get_or_try_insert_with(config, || Ok::<_, ProviderError>(RouteBook::default()))?;
        Ok(Box::new(OfflineDirections { routes }))
    }

    fn create_map_image_provider(
        &mut self,
        config: &ApiClientConfig,
    ) -> Result<Box<dyn MapImageProvider>, ProviderError> {
        check_endpoint(config)?;
        let image_dir: &Path = &self.image_dir;
        let dir: PathBuf = self.image_dirs.get_or_try_insert_with(config, || {
            fs::create_dir_all(image_dir)?;
            info!("Map image cache at {}", image_dir.display());
            Ok::<_, ProviderError>(image_dir.to_path_buf())
        })?;
        Ok(Box::new(OfflineMapImages { dir }))
    }

    fn reset_connection(&mut self) {
        debug!("Dropping cached offline providers");
        self.route_books.invalidate();
        self.image_dirs.invalidate();
    }
}

/// Directions without a routing service.
#[derive(Debug)]
pub struct OfflineDirections {
    routes: RouteBook,
}

impl OfflineDirections {
    fn lock(&self) -> Result<MutexGuard<'_, ProviderCache<RouteKey, Route>>, ProviderError> {
        self.routes
            .lock()
            .map_err(|_| ProviderError::Request("route book lock poisoned".to_string()))
    }
}

fn straight_route(from: &str, to: &str) -> Route {
    let mut route: Route = Route::new(&Uuid::new_v4().to_string(), from, to);
    route
        .steps
        .push(Step::new(0.0, &format!("Travel from {from} to {to}")));
    route
}

impl DirectionsProvider for OfflineDirections {
    /// Returns `None` when both locations are the same place.
    fn get_route(&mut self, from: &str, to: &str) -> Result<Option<Route>, ProviderError> {
        let (from, to): (&str, &str) = (from.trim(), to.trim());
        if from.eq_ignore_ascii_case(to) {
            return Ok(None);
        }

        let key: RouteKey = (from.to_string(), to.to_string());
        let route: Route = self
            .lock()?
            .get_or_try_insert_with(&key, || Ok::<_, ProviderError>(straight_route(from, to)))?;
        debug!(route_id = %route.route_id, "Route from {} to {}", from, to);
        Ok(Some(route))
    }

    fn clean_cache(&mut self, tours: &[&Tour]) -> Result<(), ProviderError> {
        let mut routes = self.lock()?;
        debug!(
            "Forgetting {} remembered routes, {} tours keep theirs",
            routes.len(),
            tours.len()
        );
        routes.invalidate();
        Ok(())
    }
}

/// Placeholder map images in a cache directory.
#[derive(Debug)]
pub struct OfflineMapImages {
    dir: PathBuf,
}

impl OfflineMapImages {
    fn image_path(&self, route_id: &str) -> PathBuf {
        self.dir.join(format!("{route_id}.{IMAGE_EXTENSION}"))
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn placeholder_svg(route: &Route) -> String {
    format!(
        concat!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"400\" height=\"120\">\n",
            "  <rect width=\"400\" height=\"120\" fill=\"#eeeeee\"/>\n",
            "  <text x=\"20\" y=\"50\">{}</text>\n",
            "  <text x=\"20\" y=\"90\">{}</text>\n",
            "</svg>\n"
        ),
        escape_xml(&route.start_location),
        escape_xml(&route.end_location)
    )
}

impl MapImageProvider for OfflineMapImages {
    fn get_image(&mut self, route: &Route) -> Result<PathBuf, ProviderError> {
        let path: PathBuf = self.image_path(&route.route_id);
        if !path.exists() {
            fs::write(&path, placeholder_svg(route))?;
            debug!(route_id = %route.route_id, "Wrote map image {}", path.display());
        }
        Ok(path)
    }

    /// Deletes every cached image whose route no tour uses.
    fn clean_cache(&mut self, tours: &[&Tour]) -> Result<(), ProviderError> {
        let in_use: HashSet<&str> = tours
            .iter()
            .map(|tour| tour.route().route_id.as_str())
            .collect();

        let mut deleted: usize = 0;
        for entry in fs::read_dir(&self.dir)? {
            let path: PathBuf = entry?.path();
            let is_image: bool = path
                .extension()
                .is_some_and(|extension| extension == IMAGE_EXTENSION);
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if is_image && !in_use.contains(stem) {
                fs::remove_file(&path)?;
                deleted += 1;
            }
        }

        info!(deleted, "Cleaned map image cache");
        Ok(())
    }
}
