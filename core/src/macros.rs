//! # Entry-point Table Expansion
//!
//! Each category is declared once as a table of feature groups and their
//! entry points (see [`ze_ddi_table!`], [`zes_ddi_table!`] and
//! [`zet_ddi_table!`]). The table is handed to a callback macro;
//! `ddi_category!` is the callback that turns it into sub-table structs, the
//! group set, entry-point descriptors and the typed forwarding API.
//!
//! ## Row Grammar
//!
//! ```text
//! @category <Category>, <prefix>, <Prefix>, <Api>, <Groups>;
//! group <Group> => <field> as <scope> (required|optional) {
//!     [#[releases]] route|global <op>: <cName> (<major>, <minor>) (<params>);
//! }
//! ```
//!
//! Parameters may be tagged `#[optional]` (null accepted), `#[count]` (sizes
//! the array that follows) or `#[input]` (handle array read by the driver).
//! `global` rows occupy a sub-table slot but are served by the loader itself,
//! so no forwarder is generated for them.
//!
//! [`ze_ddi_table!`]: crate::ze_ddi_table
//! [`zes_ddi_table!`]: crate::zes_ddi_table
//! [`zet_ddi_table!`]: crate::zet_ddi_table

macro_rules! ddi_required {
    (required) => {
        true
    };
    (optional) => {
        false
    };
}

macro_rules! ddi_releases {
    (releases) => {
        true
    };
    () => {
        false
    };
}

macro_rules! ddi_optional {
    () => {
        false
    };
    (optional $($rest:ident)*) => {
        true
    };
    ($other:ident $($rest:ident)*) => {
        ddi_optional!($($rest)*)
    };
}

macro_rules! ddi_count {
    () => {
        false
    };
    (count $($rest:ident)*) => {
        true
    };
    ($other:ident $($rest:ident)*) => {
        ddi_count!($($rest)*)
    };
}

macro_rules! ddi_input {
    () => {
        false
    };
    (input $($rest:ident)*) => {
        true
    };
    ($other:ident $($rest:ident)*) => {
        ddi_input!($($rest)*)
    };
}

macro_rules! ddi_forwarder {
    (global, $($rest:tt)*) => {};
    (
        route, $field:ident, $Table:ident, $Groups:ident, $entry:ident, $method:ident, $pfn:ident, $api:ident;
        $h:ident : $hty:ty $(, $p:ident : $pty:ty)*
    ) => {
        #[doc = concat!("Forward `", stringify!($api), "`")]
        ///
        /// # Safety
        ///
        /// Pointer arguments must satisfy the entry point's C contract.
        pub unsafe fn $method(&self, $h: $hty $(, $p: $pty)*) -> $crate::result::ZeResult {
            let args = [
                $crate::param::DdiParam::to_arg($h)
                $(, $crate::param::DdiParam::to_arg($p))*
            ];
            self.dispatcher
                .invoke::<$Groups, $Table, unsafe extern "C" fn($hty $(, $pty)*) -> $crate::result::ZeResult>(
                    &$entry,
                    $crate::handle::Handle::raw($h),
                    &args,
                    |groups| groups.$field.as_deref(),
                    |table| table.$pfn,
                    // SAFETY: the caller upholds the entry point's contract.
                    |pfn| unsafe { pfn($h $(, $p)*) },
                )
        }
    };
}

macro_rules! ddi_category {
    (
        @category $Category:ident, $prefix:ident, $Prefix:ident, $Api:ident, $Groups:ident;
        $(
            group $Group:ident => $field:ident as $scope:ident ($req:ident) {
                $(
                    $(#[$ratt:ident])?
                    $kind:ident $op:ident : $api:ident ($maj:literal, $min:literal)
                        ( $( $(#[$patt:ident])* $p:ident : $pty:ty ),* );
                )*
            }
        )*
    ) => {
        paste::paste! {
            $(
                #[doc = concat!("Function pointers of the `", stringify!($Group), "` group")]
                #[repr(C)]
                #[derive(Debug, Default, Clone, Copy)]
                pub struct [<$Prefix $Group DdiTable>] {
                    $(
                        #[doc = concat!("`", stringify!($api), "`")]
                        pub [<pfn_ $op>]: Option<unsafe extern "C" fn($($pty),*) -> $crate::result::ZeResult>,
                    )*
                }

                impl [<$Prefix $Group DdiTable>] {
                    /// Group descriptor
                    pub const GROUP: $crate::table::GroupInfo = $crate::table::GroupInfo {
                        name: stringify!($Group),
                        symbol: concat!(stringify!($prefix), "Get", stringify!($Group), "ProcAddrTable"),
                        required: ddi_required!($req),
                    };
                }

                $(
                    #[allow(non_upper_case_globals)]
                    #[doc = concat!("Descriptor for `", stringify!($api), "`")]
                    pub static [<ENTRY_ $api>]: $crate::entry::EntryPoint = $crate::entry::EntryPoint {
                        name: stringify!($api),
                        category: $crate::entry::Category::$Category,
                        group: stringify!($Group),
                        version: $crate::version::ApiVersion::new($maj, $min),
                        params: &[
                            $(
                                $crate::param::ParamSpec {
                                    name: stringify!($p),
                                    optional: ddi_optional!($($patt)*),
                                    count: ddi_count!($($patt)*),
                                    input: ddi_input!($($patt)*),
                                    handle: <$pty as $crate::param::DdiParam>::HANDLE,
                                },
                            )*
                        ],
                        releases: ddi_releases!($($ratt)?),
                    };
                )*
            )*

            /// Every entry point of the category, in table order
            pub static [<$Category:upper _ENTRY_POINTS>]: &[&$crate::entry::EntryPoint] = &[
                $( $( &[<ENTRY_ $api>], )* )*
            ];

            /// Sub-tables of the category; `None` marks an unsupported group
            #[derive(Debug, Default)]
            pub struct $Groups {
                $(
                    #[doc = concat!("`", stringify!($Group), "` sub-table")]
                    pub $field: Option<alloc::boxed::Box<[<$Prefix $Group DdiTable>]>>,
                )*
            }

            impl $crate::table::GroupSet for $Groups {
                const CATEGORY: $crate::entry::Category = $crate::entry::Category::$Category;

                const GROUPS: &'static [$crate::table::GroupInfo] = &[
                    $( [<$Prefix $Group DdiTable>]::GROUP, )*
                ];

                fn fetch(
                    source: &dyn $crate::builder::ProcAddressSource,
                    version: $crate::version::ApiVersion,
                ) -> Result<Self, $crate::error::BuildError> {
                    Ok(Self {
                        $(
                            $field: $crate::builder::fetch_group(
                                source,
                                $crate::entry::Category::$Category,
                                &[<$Prefix $Group DdiTable>]::GROUP,
                                version,
                            )?,
                        )*
                    })
                }

                fn populated(&self) -> usize {
                    0 $( + usize::from(self.$field.is_some()) )*
                }

                fn release(&mut self) -> usize {
                    let mut released = 0;
                    $(
                        if self.$field.take().is_some() {
                            released += 1;
                        }
                    )*
                    released
                }
            }

            #[doc = concat!("Typed forwarding API for the ", stringify!($Category), " category")]
            #[derive(Debug, Clone, Copy)]
            pub struct $Api<'a> {
                dispatcher: &'a $crate::dispatch::Dispatcher,
            }

            impl<'a> $Api<'a> {
                /// Forward through `dispatcher`
                pub fn new(dispatcher: &'a $crate::dispatch::Dispatcher) -> Self {
                    Self { dispatcher }
                }

                $(
                    $(
                        ddi_forwarder! {
                            $kind, $field, [<$Prefix $Group DdiTable>], $Groups, [<ENTRY_ $api>],
                            [<$scope _ $op>], [<pfn_ $op>], $api;
                            $($p : $pty),*
                        }
                    )*
                )*
            }
        }
    };
}
