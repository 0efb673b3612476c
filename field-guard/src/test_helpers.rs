//! Record types shared by unit tests.

crate::record! {
    #[derive(Debug, Clone, Default)]
    pub struct Article {
        pub short_title: String => "min_length=3",
        pub title: String => "min_length=3 max_length=5",
        pub views: u64,
    }
}

crate::record! {
    #[derive(Debug, Clone, Default)]
    pub struct Contact {
        pub email: String => "format=email",
        pub age: i32 => "min=18",
    }
}

crate::record! {
    #[derive(Debug, Clone, Copy, Default)]
    pub struct Measurement {
        pub value: i8 => "min=-20",
    }
}

crate::record! {
    #[derive(Debug, Clone, Default)]
    pub struct Untagged {
        pub id: u32,
        pub name: String,
    }
}
