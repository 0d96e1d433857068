use crate::commands::{all, docs, hover, list, locate, locations, snippets};

#[derive(Clone, Copy)]
pub struct ExampleGroup {
    pub title: &'static str,
    pub commands: &'static [&'static str],
}

#[derive(Clone, Copy)]
pub struct CommandExample {
    pub name: &'static str,
    pub groups: &'static [ExampleGroup],
}

pub fn command_examples() -> &'static [CommandExample] {
    &[
        CommandExample {
            name: "snippets",
            groups: snippets::EXAMPLES,
        },
        CommandExample {
            name: "docs",
            groups: docs::EXAMPLES,
        },
        CommandExample {
            name: "locations",
            groups: locations::EXAMPLES,
        },
        CommandExample {
            name: "hover",
            groups: hover::EXAMPLES,
        },
        CommandExample {
            name: "all",
            groups: all::EXAMPLES,
        },
        CommandExample {
            name: "list",
            groups: list::EXAMPLES,
        },
        CommandExample {
            name: "locate",
            groups: locate::EXAMPLES,
        },
    ]
}
