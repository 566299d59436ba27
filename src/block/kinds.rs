use std::fmt;

/// Defines a closed set of sub-types keyed by the string tag the editor stores.
macro_rules! define_tagged_kinds {
    ( $( $(#[$meta:meta])* $name:ident { $( $variant:ident => $tag:literal ),* $(,)? } )* ) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub enum $name {
                $( $variant ),*
            }

            impl $name {
                pub const ALL: &'static [$name] = &[ $( $name::$variant ),* ];

                pub fn from_tag(tag: &str) -> Option<Self> {
                    match tag {
                        $( $tag => Some($name::$variant), )*
                        _ => None,
                    }
                }

                pub fn tag(&self) -> &'static str {
                    match self {
                        $( $name::$variant => $tag, )*
                    }
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.tag())
                }
            }
        )*
    };
}

define_tagged_kinds! {
    /// External trigger categories delivered by the messaging platform.
    EventType {
        MessageText => "message.text",
        MessageImage => "message.image",
        MessageSticker => "message.sticker",
        MessageVideo => "message.video",
        MessageAudio => "message.audio",
        MessageLocation => "message.location",
        MessageFile => "message.file",
        Follow => "follow",
        Unfollow => "unfollow",
        Join => "join",
        Leave => "leave",
        Postback => "postback",
        Beacon => "beacon",
    }

    ReplyType {
        Text => "text",
        Image => "image",
        Flex => "flex",
        Sticker => "sticker",
    }

    ControlType {
        If => "if",
        Loop => "loop",
        Wait => "wait",
    }

    SettingType {
        SetVariable => "setVariable",
        GetVariable => "getVariable",
        SaveUserData => "saveUserData",
    }

    /// How a `message.text` trigger compares the inbound text to its pattern.
    MatchMode {
        Contains => "contains",
        Exact => "exact",
        StartsWith => "startsWith",
        EndsWith => "endsWith",
        Regex => "regex",
    }

    /// The left-hand side of a structured condition.
    ConditionSubject {
        Message => "message",
        Variable => "variable",
        UserId => "userId",
    }
}

impl EventType {
    /// The trigger name as a fragment of a Python function name.
    pub fn ident(&self) -> String {
        self.tag().replace('.', "_")
    }
}
