/// Screens of the journal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Login,
    Upload,
    Timeline,
    Dashboard,
}

impl Page {
    pub fn title(self) -> &'static str {
        match self {
            Page::Login => "Welcome to Our Memory Space",
            Page::Upload => "Upload Your Memory",
            Page::Timeline => "Your Memories",
            Page::Dashboard => "Memories Dashboard",
        }
    }
}

/// Per-run UI state, owned by the app and passed where it is needed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    logged_in: bool,
    page: Page,
}

impl Session {
    /// A gated session starts on the login page; an open one on upload.
    pub fn new(gated: bool) -> Self {
        if gated {
            Self {
                logged_in: false,
                page: Page::Login,
            }
        } else {
            Self {
                logged_in: true,
                page: Page::Upload,
            }
        }
    }

    pub fn logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn log_in(&mut self) {
        self.logged_in = true;
        self.page = Page::Upload;
    }

    pub fn log_out(&mut self) {
        self.logged_in = false;
        self.page = Page::Login;
    }

    /// Switch page; only logged-in sessions can leave the login page.
    pub fn navigate(&mut self, page: Page) -> bool {
        if !self.logged_in || page == Page::Login {
            return false;
        }
        self.page = page;
        true
    }
}
