//! # Stub Expansion
//!
//! Expands the shared entry-point tables into one `extern "C"` stub per row
//! and a [`StubTable`](crate::StubTable) impl per group.

macro_rules! null_stubs {
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
                $(
                    #[allow(non_snake_case)]
                    unsafe extern "C" fn $api($($p: $pty),*) -> ZeResult {
                        let args: &[Arg] = &[$(DdiParam::to_arg($p)),*];
                        // SAFETY: the caller upholds the entry point's contract.
                        unsafe { crate::respond(&[<ENTRY_ $api>], args) }
                    }
                )*

                impl crate::StubTable for [<$Prefix $Group DdiTable>] {
                    const CATEGORY: Category = Category::$Category;
                    const INFO: GroupInfo = [<$Prefix $Group DdiTable>]::GROUP;

                    fn stubs(version: ApiVersion) -> Self {
                        let mut table = Self::default();
                        $(
                            if zel_core::version::supports(version, ApiVersion::new($maj, $min)) {
                                table.[<pfn_ $op>] = Some($api);
                            }
                        )*
                        table
                    }
                }
            )*

            /// Resolve one of this category's group getters
            pub(crate) fn getter<P: crate::NullProfile>(symbol: &str) -> Option<NonNull<c_void>> {
                $(
                    if symbol == [<$Prefix $Group DdiTable>]::GROUP.symbol {
                        return crate::getter_for::<P, [<$Prefix $Group DdiTable>]>();
                    }
                )*
                None
            }
        }
    };
}

/// Compute stubs
pub(crate) mod compute {
    use core::ffi::c_void;
    use core::ptr::NonNull;

    use zel_core::prelude::*;

    zel_core::ze_ddi_table!(null_stubs);
}

/// Sysman stubs
pub(crate) mod sysman {
    use core::ffi::c_void;
    use core::ptr::NonNull;

    use zel_core::prelude::*;

    zel_core::zes_ddi_table!(null_stubs);
}

/// Tools stubs
pub(crate) mod tools {
    use core::ffi::c_void;
    use core::ptr::NonNull;

    use zel_core::prelude::*;

    zel_core::zet_ddi_table!(null_stubs);
}
