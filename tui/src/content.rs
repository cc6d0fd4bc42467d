//! Site copy: landing page text, project cards, and the tutorial pages.

use folio_engine::Route;

pub(crate) const BRAND: &str = "GKP Coding";
pub(crate) const OWNER: &str = "Jeffrey Lai";

pub(crate) const HERO_GREETING: &str = "Hi, I'm Mr. Lai";
pub(crate) const HERO_HEADLINE: &str = "Lets Build";
pub(crate) const HERO_EMPHASIS: &str = "Modern Web Experiences";
pub(crate) const HERO_TAIL: &str = "that scale.";
pub(crate) const HERO_BODY: &str =
    "This is a quick tutorial on how to create a web page with modern frameworks.";
pub(crate) const HERO_DISCLAIMER: &str = "DISCLAIMER: Your code will be terrible. Attend Part 2 \
     to learn about proper software architecture and best practices.";
pub(crate) const HERO_LINK: &str = "How to Build a Website";

pub(crate) const ABOUT_BODY: &str = "My journey in web development began with a fascination \
     for how LLM models can help us create digital products for specific purposes. Over the \
     years, explored a better understanding of contemporary front-end development frameworks \
     and libraries, especially the React ecosystem for building robust, single-page \
     applications. My focus is helping you start that journey.";
pub(crate) const ABOUT_CLOSING: &str = "Let's connect and build something impactful together.";
pub(crate) const CORE_SKILLS: [&str; 3] = ["React.js", "Tailwind CSS", "Node.js"];

pub(crate) const CONTACT_TITLE: &str = "Get In Touch";
pub(crate) const CONNECTING: &str = "Establishing secure connection... Please wait.";

pub(crate) const GITHUB_URL: &str = "https://github.com/jcljest";
pub(crate) const LINKEDIN_URL: &str = "https://www.linkedin.com/in/jeffrey-lai-88ab23372";

#[derive(Debug)]
pub(crate) struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub tech: &'static [&'static str],
    pub demo_url: &'static str,
    pub repo_url: &'static str,
}

pub(crate) const PROJECTS: [Project; 4] = [
    Project {
        title: "E-Commerce Platform Redesign",
        description: "A complete overhaul of an existing e-commerce platform focusing on \
             mobile-first experience and performance optimization.",
        tech: &["React", "Tailwind", "Redux"],
        demo_url: "https://placeholder.dev/ecommerce",
        repo_url: "https://github.com/placeholder/ecommerce",
    },
    Project {
        title: "AI-Powered Content Generator",
        description: "A web service utilizing the Gemini API to generate structured content \
             from user prompts. Features token-based usage tracking.",
        tech: &["Next.js", "Gemini API", "Firestore"],
        demo_url: "https://placeholder.dev/ai-generator",
        repo_url: "https://github.com/placeholder/ai-generator",
    },
    Project {
        title: "Real-Time Chat Application",
        description: "A secure, real-time messaging application with private and group chat \
             functionality.",
        tech: &["Node.js", "Socket.io", "MongoDB"],
        demo_url: "https://placeholder.dev/chat-app",
        repo_url: "https://github.com/placeholder/chat-app",
    },
    Project {
        title: "Data Visualization Dashboard",
        description: "An interactive dashboard for complex data analysis built using D3.js \
             and TypeScript. Focus on accessibility and dynamic filtering.",
        tech: &["D3.js", "TypeScript", "Vite"],
        demo_url: "https://placeholder.dev/data-viz",
        repo_url: "https://github.com/placeholder/data-viz",
    },
];

#[derive(Debug)]
pub(crate) enum Block {
    Heading(&'static str),
    Para(&'static str),
    Bullets(&'static [&'static str]),
    Code(&'static str),
    Tip(&'static str),
}

#[derive(Debug)]
pub(crate) struct Page {
    pub title: &'static str,
    pub intro: &'static str,
    pub blocks: &'static [Block],
}

/// Static content for a tutorial route. `None` for the landing page and
/// the not-found view.
pub(crate) fn page(route: Route) -> Option<&'static Page> {
    match route {
        Route::HowTo => Some(&HOW_TO),
        Route::Venv => Some(&VENV),
        Route::GitHubNotes => Some(&GITHUB_NOTES),
        Route::LocalEnv => Some(&LOCAL_ENV),
        Route::UnityVr => Some(&UNITY_VR),
        Route::Home | Route::NotFound => None,
    }
}

static HOW_TO: Page = Page {
    title: "How to Build a Website",
    intro: "A step-by-step walkthrough from an empty folder to a running Vite + React \
         project styled with Tailwind CSS.",
    blocks: &[
        Block::Heading("Step 1: Verify Node & npm, scaffold Vite + React"),
        Block::Para(
            "First install Visual Studio Code. Then verify versions, generate a JSX-only \
             Vite template, and run it to confirm the dev server works.",
        ),
        Block::Code(
            "node -v\nnpm -v\n# create project in current folder\nnpm create vite@latest\n\
             cd [name of your folder]\nnpm install\nnpm run dev  # open shown localhost URL",
        ),
        Block::Tip("Each command goes on its own line in the VS Code terminal (Ctrl+`)."),
        Block::Heading("Step 2: Add Tailwind CSS"),
        Block::Para("Install Tailwind and import its layers in index.css."),
        Block::Code(
            "npm install tailwindcss @tailwindcss/vite\n\
             # then follow https://tailwindcss.com/docs/installation/using-vite",
        ),
        Block::Heading("Step 3: Keep the minimum files"),
        Block::Para(
            "Keep index.html, src/main.jsx, src/App.jsx, and src/index.css. Remove the rest.",
        ),
        Block::Bullets(&[
            "index.html: single HTML shell; Vite injects your bundle.",
            "main.jsx: bootstraps React and mounts <App />.",
            "App.jsx: your page, built from components.",
            "index.css: Tailwind layers plus any global styles.",
        ]),
        Block::Heading("Step 4: Build sections"),
        Block::Para(
            "Split the page into a navbar, hero, about, projects, and contact section. Give \
             each section an id so the navbar can link to it.",
        ),
        Block::Heading("Step 5: Publish"),
        Block::Code("npm run build\n# upload dist/ to your host"),
    ],
};

static VENV: Page = Page {
    title: "Python Virtual Environments",
    intro: "A virtual environment (venv) is a self-contained Python \"mini-install\" inside \
         your project folder. It keeps packages isolated so different projects don't \
         collide, and you don't need admin rights.",
    blocks: &[
        Block::Heading("How it looks on disk"),
        Block::Code(
            "CookingSimV2/\n\
             ├─ .venv/                ← project-only Python\n\
             │  ├─ bin/               ← python, pip, activate\n\
             │  └─ lib/.../site-packages/\n\
             ├─ .python-version       ← optional pyenv bookmark\n\
             ├─ src/ …\n\
             └─ assets/ …",
        ),
        Block::Para(
            "Activate swaps your terminal's PATH to use .venv/bin/python and .venv/bin/pip. \
             Deactivate returns you to normal.",
        ),
        Block::Heading("Why use a venv?"),
        Block::Bullets(&[
            "No admin rights needed; installs live in your project.",
            "Projects don't break each other's versions.",
            "Easy to reproduce with requirements.txt.",
        ]),
        Block::Heading("Quick Start (no admin)"),
        Block::Code(
            "python -m venv .venv\nsource .venv/bin/activate\npython -m pip install --upgrade pip",
        ),
        Block::Heading("Install project packages"),
        Block::Code(
            "python -m pip install pygame pyyaml jsonschema\n\
             # dev tools (optional)\npython -m pip install pytest ruff black mypy",
        ),
        Block::Heading("Pro Tips"),
        Block::Bullets(&[
            "Always run source .venv/bin/activate before development.",
            "Use python -m pip to guarantee you're using the venv's pip.",
            "Freeze dependencies for collaborators with pip freeze > requirements.txt.",
            "Leave the venv with deactivate.",
        ]),
    ],
};

static GITHUB_NOTES: Page = Page {
    title: "GitHub Notes: Plain English Reference",
    intro: "Start with the why, then the what, then the how. Use this as a quick reference \
         and a launchpad for deeper questions.",
    blocks: &[
        Block::Heading("1. What is GitHub?"),
        Block::Para(
            "Git is a version control system: it records a timeline of your files. GitHub is \
             the cloud place that hosts that timeline so you can back it up, share, and \
             collaborate.",
        ),
        Block::Heading("2. Why do developers use it?"),
        Block::Bullets(&[
            "Never lose work: every meaningful save is a commit.",
            "Collaborate safely: merge changes instead of overwriting.",
            "Experiment without fear: use branches as sandboxes.",
            "Publish and learn from others: explore open-source projects.",
        ]),
        Block::Heading("3. The Core Idea of Git"),
        Block::Bullets(&[
            "Repository: the folder tracked by Git.",
            "Commit: a saved snapshot with a message.",
            "Branch: separate line of development.",
            "Merge: combine one branch into another.",
        ]),
        Block::Heading("4. How GitHub Fits In"),
        Block::Para(
            "Locally you have Git; remotely, GitHub hosts the same history. You connect them \
             via push (upload) and pull (download).",
        ),
        Block::Heading("5. Basic Commands"),
        Block::Code(
            "git init                      # start version control here\n\
             git add . && git commit -m \"message\"\n\
             git checkout -b new-feature   # start a new idea safely\n\
             git push origin main          # upload to GitHub\n\
             git pull                      # get the latest",
        ),
        Block::Heading("6. Healthy Beginner Workflow"),
        Block::Bullets(&[
            "Pull before you start.",
            "Commit small, focused changes with clear messages.",
            "Push at the end of every session.",
        ]),
        Block::Tip("Ask \"why\" before \"how\": understanding the timeline makes every command obvious."),
    ],
};

static LOCAL_ENV: Page = Page {
    title: "Local Python Environment",
    intro: "A pragmatic, reproducible Python setup for local development. Use pyenv to pick \
         an interpreter, then isolate project deps with venv.",
    blocks: &[
        Block::Heading("Install & Pin Python (pyenv)"),
        Block::Code(
            "curl https://pyenv.run | bash\n\
             pyenv install 3.12.6\npyenv local 3.12.6\npython -V   # expect 3.12.6",
        ),
        Block::Tip(
            "If the terminal \"freezes\" during build, press Ctrl+Q to resume output; use top \
             to verify CPU is active.",
        ),
        Block::Heading("Create & Use a Virtual Environment"),
        Block::Code(
            "python -m venv venv\nsource venv/bin/activate\n\
             python -m pip install -U pip setuptools wheel\n# when done\ndeactivate",
        ),
        Block::Heading("Editable Install (local packages)"),
        Block::Code("python -m pip install -e .\npython -m pip install -e \".[dev]\""),
        Block::Para("-e . links your source so edits reflect instantly without reinstalling."),
        Block::Heading("VS Code Interpreter Selection"),
        Block::Bullets(&[
            "Open Command Palette, then Python: Select Interpreter.",
            "Pick .../your-project/venv/bin/python.",
            "Reload the window so Pylance resolves packages.",
        ]),
    ],
};

static UNITY_VR: Page = Page {
    title: "Meta Quest: Setup + Hello Cube",
    intro: "Fastest path from a blank Unity 2022.3 URP project to seeing a cube in-headset. \
         Designed for classroom flow and repeatability.",
    blocks: &[
        Block::Heading("One-time Setup"),
        Block::Bullets(&[
            "Install Unity 2022.3 LTS with Android Build Support via Unity Hub.",
            "Meta Quest app: Devices, Developer Mode, On; reboot the headset once.",
            "Connect over USB-C and allow USB debugging in-headset.",
            "Run adb devices; your Quest should appear as a single device ID.",
        ]),
        Block::Heading("Create Project (URP)"),
        Block::Para(
            "Unity Hub, New, Template: Universal 3D (URP). Then File, Build Settings, \
             Android, Switch Platform.",
        ),
        Block::Heading("XR Plugin & Player Settings"),
        Block::Bullets(&[
            "Scripting Backend: IL2CPP",
            "Target Architectures: ARM64",
            "Minimum API: Android 10 (API 29)+",
            "Color Space: Linear",
            "Stereo Rendering Mode: Multiview",
        ]),
        Block::Heading("Build the Minimal XR Scene"),
        Block::Bullets(&[
            "Delete the default Main Camera and add an XR Origin.",
            "Add a Cube at (0, 0, 2.0) scaled to 0.4.",
            "Add a Directional Light.",
        ]),
        Block::Heading("Build & Run to Quest"),
        Block::Para(
            "Add open scenes, connect the headset, and click Build And Run. The APK installs \
             and launches with the cube directly ahead.",
        ),
        Block::Tip("Black screen on launch? Check Color Space = Linear and Multiview."),
    ],
};
