//! Whitted-style ray tracer over an Arbor scene.
//!
//! `render_image` maps every pixel to a camera ray, `trace` resolves it
//! recursively and `intersect` walks the whole scene tree, querying each
//! primitive's cached BVH with the ray in the primitive's local space.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use arbor_math::{Color, Mat4, Ray, Vec3};
use arbor_scene::{Camera, ObjectId, Primitive, ProjectionType, Scene};
use rayon::prelude::*;

use crate::cache::BvhCache;
use crate::config::TracerConfig;
use crate::error::{RenderError, RenderResult};
use crate::image_buffer::ImageSink;
use crate::intersection::Intersection;
use crate::shader::{FlatShader, Shader};
use crate::triangle::intersect_mesh_triangle;

/// Common surface of scene renderers.
pub trait Renderer {
    fn scene(&self) -> &Scene;

    /// Object whose camera the renderer looks through.
    fn camera(&self) -> Option<ObjectId>;

    /// Look through `camera`, which must carry a `Camera` component.
    fn set_camera(&mut self, camera: ObjectId) -> RenderResult<()>;

    fn image_size(&self) -> (u32, u32);

    fn set_image_size(&mut self, width: u32, height: u32) -> RenderResult<()>;

    /// Interactive render entry point.
    fn render(&mut self) -> RenderResult<()>;
}

/// Diagnostic counters of the last render (or of direct queries since).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Rays traced
    pub rays: u64,
    /// Traced rays that hit geometry
    pub hits: u64,
    /// Scene intersection queries
    pub intersections: u64,
    /// Objects visited by those queries
    pub objects_visited: u64,
}

#[derive(Debug, Default)]
struct Counters {
    rays: AtomicU64,
    hits: AtomicU64,
    intersections: AtomicU64,
    objects_visited: AtomicU64,
}

impl Counters {
    fn reset(&self) {
        for counter in [&self.rays, &self.hits, &self.intersections, &self.objects_visited] {
            counter.store(0, Ordering::Relaxed);
        }
    }

    fn snapshot(&self) -> RenderStats {
        RenderStats {
            rays: self.rays.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            intersections: self.intersections.load(Ordering::Relaxed),
            objects_visited: self.objects_visited.load(Ordering::Relaxed),
        }
    }
}

/// Pixel-to-ray mapping for one render.
#[derive(Debug, Clone, Copy)]
struct View {
    eye: Vec3,
    /// View reference coordinates: right, up, back
    u: Vec3,
    v: Vec3,
    n: Vec3,
    projection: ProjectionType,
    near: f32,
    far: f32,
    /// Window size in world units
    vw: f32,
    vh: f32,
    /// Image size in pixels
    w: f32,
    h: f32,
}

impl View {
    fn new(camera: &Camera, camera_to_world: Mat4, width: u32, height: u32) -> Self {
        let (w, h) = (width as f32, height as f32);
        let window = camera.window_height();
        // The window height spans the shorter image side
        let (vw, vh) = if width >= height {
            (window * w / h, window)
        } else {
            (window, window * h / w)
        };
        let (near, far) = camera.clipping_planes();

        Self {
            eye: camera_to_world.w_axis.truncate(),
            u: camera_to_world.x_axis.truncate().normalize_or_zero(),
            v: camera_to_world.y_axis.truncate().normalize_or_zero(),
            n: camera_to_world.z_axis.truncate().normalize_or_zero(),
            projection: camera.projection_type(),
            near,
            far,
            vw,
            vh,
            w,
            h,
        }
    }

    /// Point on the view window for image coordinates `(x, y)`.
    fn image_to_window(&self, x: f32, y: f32) -> Vec3 {
        self.vw * (x / self.w - 0.5) * self.u + self.vh * (y / self.h - 0.5) * self.v
    }

    fn pixel_ray(&self, x: f32, y: f32) -> Ray {
        let p = self.image_to_window(x, y);
        let ray = match self.projection {
            ProjectionType::Perspective => {
                Ray::new(self.eye, (p - self.near * self.n).normalize())
            }
            ProjectionType::Parallel => Ray::new(self.eye + p, -self.n),
        };
        ray.with_extent(self.near, self.far)
    }
}

/// Ray tracer bound to a scene for its whole lifetime.
///
/// Holding `&Scene` keeps the graph frozen while the tracer exists.
pub struct RayTracer<'a> {
    scene: &'a Scene,
    camera: Option<ObjectId>,
    width: u32,
    height: u32,
    config: TracerConfig,
    cache: Arc<BvhCache>,
    shader: Box<dyn Shader>,
    counters: Counters,
}

impl<'a> RayTracer<'a> {
    /// Create a tracer looking through the scene's current camera.
    pub fn new(scene: &'a Scene, config: TracerConfig) -> Self {
        Self {
            scene,
            camera: scene.current_camera(),
            width: 0,
            height: 0,
            cache: Arc::new(BvhCache::new(config.bvh_leaf_size)),
            config,
            shader: Box::new(FlatShader),
            counters: Counters::default(),
        }
    }

    /// Share `cache` with other tracers of the same session.
    ///
    /// BVHs come out of the shared cache with the cache's leaf size, which
    /// overrides `config.bvh_leaf_size`.
    pub fn with_cache(mut self, cache: Arc<BvhCache>) -> Self {
        if cache.leaf_size() != self.config.bvh_leaf_size {
            log::warn!(
                "Shared BVH cache uses leaf size {}; ignoring configured leaf size {}",
                cache.leaf_size(),
                self.config.bvh_leaf_size
            );
        }
        self.cache = cache;
        self
    }

    pub fn with_shader(mut self, shader: impl Shader + 'static) -> Self {
        self.shader = Box::new(shader);
        self
    }

    pub fn scene(&self) -> &'a Scene {
        self.scene
    }

    pub fn config(&self) -> &TracerConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<BvhCache> {
        &self.cache
    }

    pub fn stats(&self) -> RenderStats {
        self.counters.snapshot()
    }

    pub fn reset_stats(&self) {
        self.counters.reset();
    }

    /// Render into `image`, adopting its size.
    pub fn render_image(&mut self, image: &mut dyn ImageSink) -> RenderResult<RenderStats> {
        let start = Instant::now();
        self.set_image_size(image.width(), image.height())?;
        let view = self.view()?;

        self.counters.reset();
        if self.config.parallel {
            // Lazy builds would serialize the workers on the cache lock
            self.cache.prebuild(self.scene);
            self.scan_parallel(&view, image);
        } else {
            self.scan(&view, image);
        }

        let stats = self.stats();
        log::info!(
            "Rendered {}x{}: {} rays, {} hits in {:.3?}",
            self.width,
            self.height,
            stats.rays,
            stats.hits,
            start.elapsed()
        );
        Ok(stats)
    }

    fn view(&self) -> RenderResult<View> {
        let id = self.camera.ok_or(RenderError::NoCamera)?;
        let camera = self
            .scene
            .component::<Camera>(id)
            .ok_or(RenderError::NotACamera(id))?;
        let transform = self.scene.transform(id).ok_or(RenderError::NotACamera(id))?;
        Ok(View::new(
            camera,
            transform.local_to_world_matrix(),
            self.width,
            self.height,
        ))
    }

    fn scan_row(&self, view: &View, j: u32) -> Vec<Color> {
        let y = j as f32 + 0.5;
        (0..self.width)
            .map(|i| self.shoot(view, i as f32 + 0.5, y))
            .collect()
    }

    fn scan(&self, view: &View, image: &mut dyn ImageSink) {
        for j in 0..self.height {
            log::trace!("Scanning line {} of {}", j + 1, self.height);
            let row = self.scan_row(view, j);
            image.set_data(0, j, &row);
        }
    }

    fn scan_parallel(&self, view: &View, image: &mut dyn ImageSink) {
        let rows: Vec<Vec<Color>> = (0..self.height)
            .into_par_iter()
            .map(|j| self.scan_row(view, j))
            .collect();
        for (j, row) in rows.iter().enumerate() {
            image.set_data(0, j as u32, row);
        }
    }

    /// Color of pixel `(x, y)`, clamped to at most 1 per channel.
    fn shoot(&self, view: &View, x: f32, y: f32) -> Color {
        let ray = view.pixel_ray(x, y);
        self.trace(&ray, 0, 1.0).min(Color::ONE)
    }

    /// Color seen along `ray`.
    ///
    /// Rays deeper than `max_recursion_level` or lighter than `min_weight`
    /// contribute black without touching the scene.
    pub fn trace(&self, ray: &Ray, level: u32, weight: f32) -> Color {
        if level > self.config.max_recursion_level || weight < self.config.min_weight {
            return Color::ZERO;
        }
        self.counters.rays.fetch_add(1, Ordering::Relaxed);

        let mut hit = Intersection::new(ray.t_max);
        if self.intersect(ray, &mut hit) {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            self.shader.shade(self, ray, &hit, level, weight)
        } else {
            self.scene.background
        }
    }

    /// Find the nearest hit along `ray` over the whole scene.
    ///
    /// Resets `hit`, then visits every object once, depth-first. Hidden
    /// objects, objects without a primitive or mesh, and objects whose world
    /// transform is singular are skipped (their children are still visited).
    pub fn intersect(&self, ray: &Ray, hit: &mut Intersection) -> bool {
        self.counters.intersections.fetch_add(1, Ordering::Relaxed);
        *hit = Intersection::new(ray.t_max);

        let mut visited = 0u64;
        for id in self.scene.depth_first() {
            visited += 1;

            if !self.scene.object(id).is_some_and(|o| o.visible) {
                continue;
            }
            let Some(mesh) = self
                .scene
                .component::<Primitive>(id)
                .and_then(Primitive::mesh)
            else {
                continue;
            };
            if mesh.is_empty() {
                continue;
            }
            let Some(world_to_local) = self
                .scene
                .transform(id)
                .and_then(|t| t.world_to_local_matrix())
            else {
                continue;
            };

            let local_ray = ray.transformed(&world_to_local);
            let bvh = self.cache.get_or_build(mesh);

            // The BVH proposes, the primitive's exact test commits
            let mut candidate = *hit;
            if bvh.intersect(&local_ray, &mut candidate)
                && intersect_mesh_triangle(&local_ray, bvh.mesh(), candidate.triangle_index, hit)
            {
                hit.object = Some(id);
            }
        }

        self.counters.objects_visited.fetch_add(visited, Ordering::Relaxed);
        hit.is_hit()
    }

    /// True if anything lies along `ray` within its extent.
    pub fn shadow(&self, ray: &Ray) -> bool {
        let mut hit = Intersection::new(ray.t_max);
        self.intersect(ray, &mut hit)
    }
}

impl Renderer for RayTracer<'_> {
    fn scene(&self) -> &Scene {
        self.scene
    }

    fn camera(&self) -> Option<ObjectId> {
        self.camera
    }

    fn set_camera(&mut self, camera: ObjectId) -> RenderResult<()> {
        if self.scene.component::<Camera>(camera).is_none() {
            return Err(RenderError::NotACamera(camera));
        }
        self.camera = Some(camera);
        Ok(())
    }

    fn image_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_image_size(&mut self, width: u32, height: u32) -> RenderResult<()> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidImageSize { width, height });
        }
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn render(&mut self) -> RenderResult<()> {
        Err(RenderError::UnsupportedPath("RayTracer::render"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_buffer::ImageBuffer;
    use crate::triangle::intersect_mesh;
    use arbor_scene::{Material, MeshRegistry};

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// Box at the origin, seen by a camera at (0, 0, 5) looking down -Z.
    fn box_scene(projection: Camera) -> (Scene, ObjectId) {
        let assets = MeshRegistry::with_defaults();
        let mut scene = Scene::new("Test");
        scene.background = Color::new(0.0, 0.0, 0.25);

        let cube = scene.create_object("Box", None).unwrap();
        let primitive = assets
            .make_primitive("Box")
            .unwrap()
            .with_material(Material::with_diffuse(Color::new(1.0, 0.5, 0.0)));
        scene.add_component(cube, primitive).unwrap();

        let camera = scene.create_object("Camera", None).unwrap();
        scene.add_component(camera, projection).unwrap();
        scene.set_local_position(camera, Vec3::new(0.0, 0.0, 5.0)).unwrap();
        scene.set_current_camera(Some(camera)).unwrap();

        (scene, cube)
    }

    /// Shader that bounces every hit straight back along the ray.
    struct MirrorShader;

    impl Shader for MirrorShader {
        fn shade(&self, tracer: &RayTracer<'_>, ray: &Ray, hit: &Intersection, level: u32, weight: f32) -> Color {
            let bounced = Ray::new(ray.at(hit.distance), -ray.direction).with_extent(1e-3, f32::INFINITY);
            Color::splat(0.1) + tracer.trace(&bounced, level + 1, weight * 0.5)
        }
    }

    #[test]
    fn test_trace_beyond_max_level_is_black() {
        let (scene, _) = box_scene(Camera::default());
        let tracer = RayTracer::new(&scene, TracerConfig::default());
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);

        assert_eq!(tracer.trace(&ray, 7, 1.0), Color::ZERO);
        assert_eq!(tracer.stats(), RenderStats::default());

        // At the limit the ray is still traced
        assert_ne!(tracer.trace(&ray, 6, 1.0), Color::ZERO);
        assert_eq!(tracer.stats().intersections, 1);
    }

    #[test]
    fn test_trace_below_min_weight_is_black() {
        let (scene, _) = box_scene(Camera::default());
        let tracer = RayTracer::new(&scene, TracerConfig::default().with_min_weight(0.5));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);

        assert_eq!(tracer.trace(&ray, 0, 0.25), Color::ZERO);
        assert_eq!(tracer.stats().rays, 0);
    }

    #[test]
    fn test_miss_returns_background() {
        let (scene, _) = box_scene(Camera::default());
        let tracer = RayTracer::new(&scene, TracerConfig::default());
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);

        assert_eq!(tracer.trace(&ray, 0, 1.0), scene.background);
        assert_eq!(tracer.stats().hits, 0);
    }

    #[test]
    fn test_recursion_stops_at_max_level() {
        let (scene, _) = box_scene(Camera::default());
        let config = TracerConfig::default().with_max_recursion_level(3).with_min_weight(0.0);
        let tracer = RayTracer::new(&scene, config).with_shader(MirrorShader);

        // Ray starting inside the box bounces between opposite faces
        let ray = Ray::new(Vec3::new(0.1, 0.2, 0.0), Vec3::Z);
        let color = tracer.trace(&ray, 0, 1.0);

        assert_eq!(tracer.stats().rays, 4);
        assert!((color.x - 0.4).abs() < 1e-5);
    }

    #[test]
    fn test_intersect_visits_every_object_and_keeps_nearest() {
        let assets = MeshRegistry::with_defaults();
        let mut scene = Scene::new("Test");

        let group = scene.create_object("Group", None).unwrap();
        let mut expected_object = None;
        for (i, z) in [-4.0f32, -1.0, -7.0].into_iter().enumerate() {
            let id = scene.create_object(format!("Ball {}", i), Some(group)).unwrap();
            scene.add_component(id, assets.make_primitive("Sphere").unwrap()).unwrap();
            scene.set_local_position(id, Vec3::new(0.0, 0.0, z)).unwrap();
            if z == -1.0 {
                expected_object = Some(id);
            }
        }
        // Hidden box in front of everything
        let hidden = scene.create_object("Hidden", None).unwrap();
        scene.add_component(hidden, assets.make_primitive("Box").unwrap()).unwrap();
        scene.object_mut(hidden).unwrap().visible = false;
        // Flattened box and an object without a mesh
        let flat = scene.create_object("Flat", None).unwrap();
        scene.add_component(flat, assets.make_primitive("Box").unwrap()).unwrap();
        scene.set_local_scale(flat, Vec3::new(1.0, 0.0, 1.0)).unwrap();
        let empty = scene.create_object("Empty", Some(hidden)).unwrap();
        scene.add_component(empty, assets.make_primitive("None").unwrap()).unwrap();

        let tracer = RayTracer::new(&scene, TracerConfig::default());
        let ray = Ray::new(Vec3::new(0.0, 0.1, 5.0), Vec3::NEG_Z);
        let mut hit = Intersection::default();

        assert!(tracer.intersect(&ray, &mut hit));
        assert_eq!(hit.object, expected_object);
        assert_eq!(tracer.stats().objects_visited, scene.object_count() as u64);

        // Brute force over every visible primitive
        let mut nearest = f32::INFINITY;
        for id in scene.children(Some(group)) {
            let mesh = scene.component::<Primitive>(id).unwrap().mesh().unwrap();
            let to_local = scene.transform(id).unwrap().world_to_local_matrix().unwrap();
            let mut brute = Intersection::new(ray.t_max);
            if intersect_mesh(&ray.transformed(&to_local), mesh, &mut brute) {
                nearest = nearest.min(brute.distance);
            }
        }
        assert_eq!(hit.distance, nearest);
        assert!((hit.distance - 5.5).abs() < 0.05);
    }

    #[test]
    fn test_transformed_primitive_distance() {
        let (mut scene, cube) = box_scene(Camera::default());
        scene.set_local_scale(cube, Vec3::splat(2.0)).unwrap();
        let tracer = RayTracer::new(&scene, TracerConfig::default());

        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let mut hit = Intersection::default();
        assert!(tracer.intersect(&ray, &mut hit));
        assert!((hit.distance - 4.0).abs() < 1e-5);
        assert_eq!(hit.object, Some(cube));
    }

    #[test]
    fn test_shadow() {
        let (scene, _) = box_scene(Camera::default());
        let tracer = RayTracer::new(&scene, TracerConfig::default());

        assert!(tracer.shadow(&Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y)));
        assert!(!tracer.shadow(&Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y)));
        // Occluder beyond the ray's extent
        let short = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y).with_extent(0.0, 2.0);
        assert!(!tracer.shadow(&short));
    }

    #[test]
    fn test_render_image_perspective() {
        init_logging();
        let (scene, _) = box_scene(Camera::perspective(60.0));
        let mut tracer = RayTracer::new(&scene, TracerConfig::default());
        let mut image = ImageBuffer::new(9, 9);

        let stats = tracer.render_image(&mut image).unwrap();

        assert_eq!(tracer.image_size(), (9, 9));
        assert_eq!(stats.rays, 81);
        assert!(stats.hits > 0 && stats.hits < 81);
        assert_eq!(image.get(4, 4), Color::new(1.0, 0.5, 0.0));
        assert_eq!(image.get(0, 0), scene.background);
        assert_eq!(image.get(8, 8), scene.background);
    }

    #[test]
    fn test_render_image_parallel_projection() {
        let (scene, _) = box_scene(Camera::parallel(4.0));
        let mut tracer = RayTracer::new(&scene, TracerConfig::default());
        let mut image = ImageBuffer::new(8, 8);

        tracer.render_image(&mut image).unwrap();

        // Window spans [-2, 2]; the unit box covers the middle quarter
        assert_eq!(image.get(3, 4), Color::new(1.0, 0.5, 0.0));
        assert_eq!(image.get(0, 4), scene.background);
        assert_eq!(image.get(7, 7), scene.background);
    }

    #[test]
    fn test_portrait_view_window_and_rays() {
        // 90 degrees: the window is 2 * near high
        let camera = Camera::perspective(90.0);
        let view = View::new(&camera, Mat4::IDENTITY, 4, 8);

        // The window height spans the shorter (horizontal) side
        assert!((view.vw - 0.02).abs() < 1e-6);
        assert!((view.vh - 0.04).abs() < 1e-6);

        let center = view.pixel_ray(2.0, 4.0);
        assert_eq!(center.origin, Vec3::ZERO);
        assert!((center.direction - Vec3::NEG_Z).length() < 1e-6);
        assert_eq!((center.t_min, center.t_max), camera.clipping_planes());

        let bottom_left = view.pixel_ray(0.0, 0.0);
        let expected = Vec3::new(-1.0, -2.0, -1.0).normalize();
        assert!((bottom_left.direction - expected).length() < 1e-5);

        let top_right = view.pixel_ray(4.0, 8.0);
        let expected = Vec3::new(1.0, 2.0, -1.0).normalize();
        assert!((top_right.direction - expected).length() < 1e-5);
    }

    #[test]
    fn test_render_image_portrait() {
        let (mut scene, _) = box_scene(Camera::parallel(2.0));
        let camera = scene.current_camera().unwrap();
        // Off-center so no pixel ray runs along a face diagonal
        scene.set_local_position(camera, Vec3::new(0.1, 0.05, 5.0)).unwrap();
        let mut tracer = RayTracer::new(&scene, TracerConfig::default());
        let mut image = ImageBuffer::new(4, 8);

        tracer.render_image(&mut image).unwrap();

        // Window is 2 wide and 4 high; the unit box covers columns 1-2 of rows 3-4
        let orange = Color::new(1.0, 0.5, 0.0);
        for (x, y) in [(1, 3), (2, 3), (1, 4), (2, 4)] {
            assert_eq!(image.get(x, y), orange, "pixel ({}, {})", x, y);
        }
        for (x, y) in [(0, 4), (3, 4), (1, 2), (2, 5), (0, 0), (3, 7)] {
            assert_eq!(image.get(x, y), scene.background, "pixel ({}, {})", x, y);
        }
    }

    #[test]
    fn test_shared_cache_leaf_size_wins() {
        let (scene, _) = box_scene(Camera::default());
        let cache = Arc::new(BvhCache::new(2));
        let mut tracer = RayTracer::new(&scene, TracerConfig::default().with_bvh_leaf_size(8))
            .with_cache(cache.clone());
        let mut image = ImageBuffer::new(2, 2);
        tracer.render_image(&mut image).unwrap();

        assert!(Arc::ptr_eq(tracer.cache(), &cache));
        let cube = scene.find_by_name("Box").unwrap();
        let mesh = scene.component::<Primitive>(cube).unwrap().mesh().unwrap();
        assert_eq!(cache.get(mesh).unwrap().leaf_size(), 2);
    }

    #[test]
    fn test_parallel_scan_matches_sequential() {
        let (scene, _) = box_scene(Camera::perspective(45.0));
        let mut sequential = ImageBuffer::new(16, 12);
        let mut parallel = ImageBuffer::new(16, 12);

        RayTracer::new(&scene, TracerConfig::default())
            .render_image(&mut sequential)
            .unwrap();
        let mut tracer = RayTracer::new(&scene, TracerConfig::default().with_parallel(true));
        tracer.render_image(&mut parallel).unwrap();

        assert_eq!(sequential.pixels, parallel.pixels);
        assert_eq!(tracer.cache().build_count(), 1);
    }

    #[test]
    fn test_shared_mesh_builds_one_bvh() {
        let assets = MeshRegistry::with_defaults();
        let mut scene = Scene::new("Test");
        for x in [-1.0f32, 1.0] {
            let id = scene.create_object("Ball", None).unwrap();
            scene.add_component(id, assets.make_primitive("Sphere").unwrap()).unwrap();
            scene.set_local_position(id, Vec3::new(x, 0.0, 0.0)).unwrap();
        }

        let cache = Arc::new(BvhCache::default());
        let tracer = RayTracer::new(&scene, TracerConfig::default()).with_cache(cache.clone());
        for x in [-1.0f32, 1.0] {
            assert!(tracer.shadow(&Ray::new(Vec3::new(x, 0.0, 5.0), Vec3::NEG_Z)));
        }

        assert_eq!(cache.build_count(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_camera_errors() {
        let (mut scene, cube) = box_scene(Camera::default());
        {
            let mut tracer = RayTracer::new(&scene, TracerConfig::default());
            assert!(matches!(tracer.set_camera(cube), Err(RenderError::NotACamera(id)) if id == cube));
            assert!(matches!(
                tracer.render_image(&mut ImageBuffer::new(0, 4)),
                Err(RenderError::InvalidImageSize { width: 0, height: 4 })
            ));
            assert!(matches!(tracer.render(), Err(RenderError::UnsupportedPath(_))));
        }

        scene.set_current_camera(None).unwrap();
        let mut tracer = RayTracer::new(&scene, TracerConfig::default());
        assert!(matches!(
            tracer.render_image(&mut ImageBuffer::new(4, 4)),
            Err(RenderError::NoCamera)
        ));
    }
}
