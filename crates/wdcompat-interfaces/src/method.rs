use std::fmt;

/// Commands of the current automation API that legacy calls translate into.
///
/// `as_str` returns the command's public name; engines that dispatch by name
/// can match on it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Method {
    // Server / session
    GetStatus,
    GetSessions,
    // Timeouts
    GetFindTimeout,
    SetFindTimeout,
    SetExecuteAsyncTimeout,
    // Windows and navigation
    GetCurrentWindowHandle,
    GetAllWindowHandles,
    GetCurrentUrl,
    GoForward,
    GoBack,
    SwitchToFrame,
    SwitchToWindow,
    CloseCurrentWindow,
    SetWindowSize,
    SetWindowPosition,
    MaximizeWindow,
    GetPageSource,
    GetPageTitle,
    // Scripts
    Execute,
    ExecuteAsync,
    // Cookies and storage
    GetCookies,
    ClearCookies,
    SetLocalStorageItem,
    GetLocalStorageItem,
    DeleteLocalStorageItem,
    // Logs
    GetLogsFor,
    GetAvailableLogTypes,
    // Lookup
    Find,
    FindByClassName,
    FindByCssSelector,
    FindById,
    FindByName,
    FindByLinkText,
    FindByPartialLinkText,
    FindByTagName,
    FindByXpath,
    FindAll,
    FindAllByClassName,
    FindAllByCssSelector,
    FindAllByName,
    FindAllByLinkText,
    FindAllByPartialLinkText,
    FindAllByTagName,
    FindAllByXpath,
    GetActiveElement,
    // Element state and interaction
    Click,
    Submit,
    Type,
    ClearValue,
    GetVisibleText,
    GetTagName,
    GetAttribute,
    GetProperty,
    GetComputedStyle,
    IsSelected,
    IsEnabled,
    IsDisplayed,
    Equals,
    GetPosition,
    GetSize,
    // Alerts
    GetAlertText,
    TypeInPrompt,
    // Pointer and touch
    MoveMouseTo,
    PressMouseButton,
    ReleaseMouseButton,
    DoubleClick,
    Tap,
    FlickFinger,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::GetStatus => "getStatus",
            Method::GetSessions => "getSessions",
            Method::GetFindTimeout => "getFindTimeout",
            Method::SetFindTimeout => "setFindTimeout",
            Method::SetExecuteAsyncTimeout => "setExecuteAsyncTimeout",
            Method::GetCurrentWindowHandle => "getCurrentWindowHandle",
            Method::GetAllWindowHandles => "getAllWindowHandles",
            Method::GetCurrentUrl => "getCurrentUrl",
            Method::GoForward => "goForward",
            Method::GoBack => "goBack",
            Method::SwitchToFrame => "switchToFrame",
            Method::SwitchToWindow => "switchToWindow",
            Method::CloseCurrentWindow => "closeCurrentWindow",
            Method::SetWindowSize => "setWindowSize",
            Method::SetWindowPosition => "setWindowPosition",
            Method::MaximizeWindow => "maximizeWindow",
            Method::GetPageSource => "getPageSource",
            Method::GetPageTitle => "getPageTitle",
            Method::Execute => "execute",
            Method::ExecuteAsync => "executeAsync",
            Method::GetCookies => "getCookies",
            Method::ClearCookies => "clearCookies",
            Method::SetLocalStorageItem => "setLocalStorageItem",
            Method::GetLocalStorageItem => "getLocalStorageItem",
            Method::DeleteLocalStorageItem => "deleteLocalStorageItem",
            Method::GetLogsFor => "getLogsFor",
            Method::GetAvailableLogTypes => "getAvailableLogTypes",
            Method::Find => "find",
            Method::FindByClassName => "findByClassName",
            Method::FindByCssSelector => "findByCssSelector",
            Method::FindById => "findById",
            Method::FindByName => "findByName",
            Method::FindByLinkText => "findByLinkText",
            Method::FindByPartialLinkText => "findByPartialLinkText",
            Method::FindByTagName => "findByTagName",
            Method::FindByXpath => "findByXpath",
            Method::FindAll => "findAll",
            Method::FindAllByClassName => "findAllByClassName",
            Method::FindAllByCssSelector => "findAllByCssSelector",
            Method::FindAllByName => "findAllByName",
            Method::FindAllByLinkText => "findAllByLinkText",
            Method::FindAllByPartialLinkText => "findAllByPartialLinkText",
            Method::FindAllByTagName => "findAllByTagName",
            Method::FindAllByXpath => "findAllByXpath",
            Method::GetActiveElement => "getActiveElement",
            Method::Click => "click",
            Method::Submit => "submit",
            Method::Type => "type",
            Method::ClearValue => "clearValue",
            Method::GetVisibleText => "getVisibleText",
            Method::GetTagName => "getTagName",
            Method::GetAttribute => "getAttribute",
            Method::GetProperty => "getProperty",
            Method::GetComputedStyle => "getComputedStyle",
            Method::IsSelected => "isSelected",
            Method::IsEnabled => "isEnabled",
            Method::IsDisplayed => "isDisplayed",
            Method::Equals => "equals",
            Method::GetPosition => "getPosition",
            Method::GetSize => "getSize",
            Method::GetAlertText => "getAlertText",
            Method::TypeInPrompt => "typeInPrompt",
            Method::MoveMouseTo => "moveMouseTo",
            Method::PressMouseButton => "pressMouseButton",
            Method::ReleaseMouseButton => "releaseMouseButton",
            Method::DoubleClick => "doubleClick",
            Method::Tap => "tap",
            Method::FlickFinger => "flickFinger",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
