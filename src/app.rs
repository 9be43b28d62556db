//! Viewport root
//!
//! Owns the window, the render engine, the UI and the composed scene, and
//! drives them from the winit event loop. GPU resources are created when the
//! application is resumed; a failure there ends the loop and is returned from
//! [`ShapesApp::run`].

use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    clock::FrameClock,
    composer,
    config::ViewportConfig,
    error::{Error, Result},
    gfx::{
        gizmos::GizmoManager,
        rendering::RenderEngine,
        scene::{light::light_config, Scene},
    },
    interaction::PointerRouter,
    ui::{light_panel, UiManager},
};

pub struct ShapesApp {
    event_loop: EventLoop<()>,
    app_state: AppState,
}

struct AppState {
    config: ViewportConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    scene: Scene,
    gizmos: GizmoManager,
    router: PointerRouter,
    clock: FrameClock,
    // First error raised while bringing up the window
    error: Option<Error>,
}

impl ShapesApp {
    /// Creates the event loop and composes the scene
    pub fn new(config: ViewportConfig) -> Result<Self> {
        let event_loop = EventLoop::new()?;

        let (width, height) = config.size;
        let camera_manager = config.camera_manager(width.max(1) as f32 / height.max(1) as f32);
        let scene = composer::compose(camera_manager);

        Ok(Self {
            event_loop,
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                ui_manager: None,
                scene,
                gizmos: composer::light_helpers(),
                router: PointerRouter::new(),
                clock: FrameClock::new(),
                error: None,
            },
        })
    }

    /// The scene before it is mounted, for adding extra nodes
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.app_state.scene
    }

    /// Runs the event loop until the window is closed
    pub fn run(self) -> Result<()> {
        let Self {
            event_loop,
            mut app_state,
        } = self;

        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut app_state)?;

        match app_state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn init_viewport(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let (width, height) = self.config.size;
        let attributes = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(width, height));
        let window = Arc::new(event_loop.create_window(attributes)?);

        let (width, height): (u32, u32) = window.inner_size().into();
        let mut render_engine = pollster::block_on(RenderEngine::new(
            window.clone(),
            width,
            height,
            self.config.vsync,
        ))?;
        render_engine.set_clear_color(self.config.clear_color());

        self.scene.camera_manager.resize(width, height);
        self.scene.init_gpu_resources(
            render_engine.device(),
            render_engine.transform_layout(),
            render_engine.material_layout(),
        );

        let mut ui_manager = UiManager::new(
            render_engine.device(),
            render_engine.queue(),
            render_engine.surface_format(),
            &window,
            self.config.font_size,
        );
        ui_manager.resize(width, height);

        self.scene.mount();
        self.clock.reset();
        log::info!("Viewport ready at {}x{}", width, height);

        self.window = Some(window);
        self.render_engine = Some(render_engine);
        self.ui_manager = Some(ui_manager);
        Ok(())
    }

    fn screen_size(&self) -> (f32, f32) {
        self.render_engine
            .as_ref()
            .map(|engine| engine.get_surface_size())
            .map_or((0.0, 0.0), |(w, h)| (w as f32, h as f32))
    }

    fn handle_mouse_input(&mut self, state: ElementState, button: MouseButton) {
        self.scene.camera_manager.handle_mouse_button(button, state);

        if button != MouseButton::Left {
            return;
        }
        match state {
            ElementState::Pressed => self.router.pointer_pressed(),
            ElementState::Released => {
                let screen_size = self.screen_size();
                self.router.pointer_released(&mut self.scene, screen_size);
            }
        }
    }

    fn handle_keyboard(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.physical_key == PhysicalKey::Code(KeyCode::Escape)
            && event.state == ElementState::Pressed
        {
            event_loop.exit();
            return;
        }
        self.scene.camera_manager.handle_key(event);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.scene.camera_manager.resize(width, height);
        if let Some(render_engine) = self.render_engine.as_mut() {
            render_engine.resize(width, height);
        }
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            ui_manager.resize(width, height);
        }
    }

    /// One tick: UI, animation, GPU sync and the frame itself
    fn redraw(&mut self, window: &Window) {
        let (Some(render_engine), Some(ui_manager)) =
            (self.render_engine.as_mut(), self.ui_manager.as_mut())
        else {
            return;
        };

        let light_controls = &mut self.scene.light_controls;
        ui_manager.frame(window, |ui| light_panel(ui, light_controls));

        let frame = self.clock.tick();
        self.scene.update(&frame);
        self.gizmos.update(&self.scene);

        self.scene.update_gpu_resources(render_engine.queue());
        self.gizmos
            .update_gpu_resources(render_engine.device(), render_engine.queue());

        render_engine.set_light(light_config(self.scene.lights()));
        render_engine.update(self.scene.camera_manager.uniform());
        let draw_ui = |device: &wgpu::Device,
                       queue: &wgpu::Queue,
                       encoder: &mut wgpu::CommandEncoder,
                       view: &wgpu::TextureView| {
            ui_manager.render(device, queue, encoder, view);
        };
        render_engine.render_frame(&self.scene, &self.gizmos, Some(draw_ui));
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(err) = self.init_viewport(event_loop) {
            log::error!("Failed to initialise the viewport: {}", err);
            self.error = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };

        // Handle UI input first
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            if ui_manager.handle_window_event(&window, window_id, &event) {
                match event {
                    // The panel covers the canvas, shapes below lose the pointer
                    WindowEvent::CursorMoved { .. } => self.router.pointer_left(&mut self.scene),
                    WindowEvent::MouseInput {
                        state: ElementState::Released,
                        ..
                    } => self.scene.camera_manager.release_buttons(),
                    _ => {}
                }
                window.request_redraw();
                return;
            }
        }

        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                self.handle_mouse_input(state, button);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let screen_size = self.screen_size();
                self.router.pointer_moved(
                    &mut self.scene,
                    (position.x as f32, position.y as f32),
                    screen_size,
                );
            }
            WindowEvent::CursorLeft { .. } => {
                self.router.pointer_left(&mut self.scene);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_keyboard(event_loop, &event);
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.resize(width, height);
            }
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.redraw(&window);
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        // Don't process camera events when UI is active
        if self
            .ui_manager
            .as_ref()
            .is_some_and(|ui_manager| ui_manager.wants_mouse())
        {
            return;
        }

        self.scene.camera_manager.handle_device_event(&event, window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}
